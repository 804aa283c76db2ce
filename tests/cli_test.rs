use std::fs;
use std::process::Command;
use tempfile::tempdir;

const BIN: &str = env!("CARGO_BIN_EXE_junit-convert");

const SAMPLE_REPORT: &str = r#"{
  "stats": { "expected": 1, "unexpected": 0, "skipped": 0, "duration": 2000 },
  "suites": [
    {
      "title": "smoke.spec.js",
      "suites": [
        {
          "title": "Smoke",
          "specs": [
            {
              "title": "loads the dashboard",
              "tests": [ { "results": [ { "status": "passed", "duration": 2000 } ] } ]
            }
          ]
        }
      ]
    }
  ]
}"#;

#[test]
fn test_converts_directory_and_skips_bad_files() {
    let dir = tempdir().expect("failed to create temp directory");
    let path = dir.path();

    fs::write(path.join("results.json"), SAMPLE_REPORT).unwrap();
    fs::write(path.join("broken.json"), "This is not JSON at all").unwrap();
    fs::write(path.join(".last-run.json"), r#"{ "status": "passed" }"#).unwrap();

    let output = Command::new(BIN)
        .args(["--dir", path.to_str().unwrap()])
        .output()
        .expect("failed to run junit-convert");

    assert!(
        output.status.success(),
        "conversion failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("results.xml"));
    assert!(stdout.contains("1 converted, 1 skipped"));

    let xml = fs::read_to_string(path.join("results.xml")).expect("missing results.xml");
    assert!(xml.contains("<testsuite name=\"Smoke\" tests=\"1\""));
    assert!(xml.contains("name=\"loads_the_dashboard\""));

    // The malformed file is skipped, not converted; the marker file is
    // excluded entirely
    assert!(!path.join("broken.xml").exists());
    assert!(!path.join(".last-run.xml").exists());
}

#[test]
fn test_missing_directory_is_fatal() {
    let dir = tempdir().expect("failed to create temp directory");
    let missing = dir.path().join("does-not-exist");

    let output = Command::new(BIN)
        .args(["--dir", missing.to_str().unwrap()])
        .output()
        .expect("failed to run junit-convert");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("results directory not found"));
}

#[test]
fn test_empty_directory_is_not_an_error() {
    let dir = tempdir().expect("failed to create temp directory");

    let output = Command::new(BIN)
        .args(["--dir", dir.path().to_str().unwrap()])
        .output()
        .expect("failed to run junit-convert");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No JSON report files found"));
}

#[test]
fn test_fixed_report_creates_directory_and_file() {
    let dir = tempdir().expect("failed to create temp directory");
    let results = dir.path().join("test-results");

    let output = Command::new(BIN)
        .args(["--fixed", "--dir", results.to_str().unwrap()])
        .output()
        .expect("failed to run junit-convert");

    assert!(
        output.status.success(),
        "fixed report failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let xml = fs::read_to_string(results.join("results.xml")).expect("missing results.xml");
    assert!(xml.contains("tests=\"6\""));
    assert!(xml.contains("NEMESYS_Basic_Tests"));
    assert!(xml.contains("BDD_Cenario_1_Supervisor_CRM_Relatorio"));
}
