pub mod junit;
pub mod report;

// Re-export the main functionality
pub use junit::{
    builder::{build, build_fixed_report, convert, sanitize_identifier, to_xml, BuildError},
    model::{Failure, Skipped, TestCase, TestSuite, TestSuites},
};

pub use report::{
    loader::{load_tolerant, LoadError},
    model::{Attempt, ErrorEntry, Report, RunResult, Spec, Stats, Status, Suite},
};
