pub mod loader;
pub mod model;

pub use loader::{load_tolerant, LoadError};
pub use model::{Attempt, ErrorEntry, Report, RunResult, Spec, Stats, Status, Suite};
