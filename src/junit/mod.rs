pub mod builder;
pub mod model;

pub use builder::{build, build_fixed_report, convert, sanitize_identifier, to_xml, BuildError};
pub use model::{Failure, Skipped, TestCase, TestSuite, TestSuites};
