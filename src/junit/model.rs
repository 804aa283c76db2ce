/// Root element of the emitted JUnit XML
///
/// The `time` attributes throughout are pre-formatted strings so the output
/// always carries exactly three fractional digits, which is what the CI
/// dashboards ingesting these files expect.
#[derive(Debug, Clone)]
pub struct TestSuites {
    pub name: String,
    pub tests: u32,
    pub failures: u32,
    pub skipped: u32,
    pub time: String,
    pub timestamp: String,
    pub test_suites: Vec<TestSuite>,
}

/// One emitted test suite
#[derive(Debug, Clone)]
pub struct TestSuite {
    pub name: String,
    pub tests: u32,
    pub failures: u32,
    pub skipped: u32,
    pub time: String,
    pub timestamp: String,
    pub test_cases: Vec<TestCase>,
}

/// One emitted test case
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub classname: String,
    pub time: String,
    pub failure: Option<Failure>,
    pub skipped: Option<Skipped>,
}

/// Failure marker nested in a test case
#[derive(Debug, Clone)]
pub struct Failure {
    pub message: String,
    pub text: String,
}

/// Skip marker nested in a test case; serializes as `<skipped/>`
#[derive(Debug, Clone, Default)]
pub struct Skipped {}
