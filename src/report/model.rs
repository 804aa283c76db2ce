use serde::{Deserialize, Deserializer};
use std::fmt;

/// Outcome of a single test result, as reported by Playwright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Passed,
    Failed,
    Skipped,
    Unknown,
}

impl Default for Status {
    fn default() -> Self {
        Status::Unknown
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Playwright also emits "timedOut" and "interrupted"; anything
        // unrecognized collapses to Unknown
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "passed" => Status::Passed,
            "failed" => Status::Failed,
            "skipped" => Status::Skipped,
            _ => Status::Unknown,
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Passed => write!(f, "passed"),
            Status::Failed => write!(f, "failed"),
            Status::Skipped => write!(f, "skipped"),
            Status::Unknown => write!(f, "unknown"),
        }
    }
}

/// Root structure of a Playwright results.json
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub stats: Stats,

    #[serde(default)]
    pub suites: Vec<Suite>,
}

/// Aggregate counts for the whole run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stats {
    /// Number of tests that passed
    #[serde(default)]
    pub expected: u32,

    /// Number of tests that failed
    #[serde(default)]
    pub unexpected: u32,

    #[serde(default)]
    pub skipped: u32,

    /// Total wall-clock run time in milliseconds
    #[serde(default)]
    pub duration: f64,
}

/// A test suite. Playwright suites are recursive: the top level holds one
/// suite per spec file, whose nested suites are the describe blocks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Suite {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub specs: Vec<Spec>,

    #[serde(default)]
    pub suites: Vec<Suite>,
}

/// One test case definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Spec {
    #[serde(default)]
    pub title: String,

    /// One entry per project/retry configuration; only the first is
    /// consulted by the converter
    #[serde(default)]
    pub tests: Vec<Attempt>,
}

/// One run of a spec, possibly retried
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attempt {
    /// Execution outcomes, one per retry; only the first is consulted
    #[serde(default)]
    pub results: Vec<RunResult>,
}

/// One execution outcome of a spec
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunResult {
    /// Milliseconds; absent means 0
    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub status: Status,

    /// Populated when the result failed; absent on a failed result means an
    /// empty failure body downstream
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
}

/// A single error attached to a failed result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEntry {
    #[serde(default)]
    pub message: String,
}

impl Spec {
    /// First result of the first attempt, the only one the converter reads
    pub fn first_result(&self) -> Option<&RunResult> {
        self.tests.first().and_then(|attempt| attempt.results.first())
    }
}
