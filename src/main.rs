use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use junit_convert::junit::builder;
use junit_convert::report::loader;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

/// Convert Playwright JSON test reports into JUnit XML
#[derive(Debug, Parser)]
#[clap(name = "junit-convert", version, about)]
struct Args {
    /// Directory holding the Playwright JSON reports
    #[clap(long, default_value = "test-results")]
    dir: PathBuf,

    /// Write the hardcoded fallback report instead of converting run data
    #[clap(long)]
    fixed: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.fixed {
        write_fixed_report(&args.dir)
    } else {
        convert_directory(&args.dir)
    }
}

fn write_fixed_report(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create results directory {}", dir.display()))?;

    let xml = builder::to_xml(&builder::build_fixed_report(Utc::now()))?;
    let path = dir.join("results.xml");
    fs::write(&path, xml).with_context(|| format!("failed to write {}", path.display()))?;

    println!("Generated JUnit XML: {}", path.display());
    Ok(())
}

fn convert_directory(dir: &Path) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("results directory not found: {}", dir.display()))?;

    let mut report_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_report_file(path))
        .collect();
    report_files.sort();

    if report_files.is_empty() {
        println!("No JSON report files found in {}", dir.display());
        return Ok(());
    }

    let mut converted = 0usize;
    let mut skipped = 0usize;

    // Each file is an isolated unit of work: a malformed one is logged and
    // skipped without aborting the batch.
    for path in &report_files {
        match convert_file(path) {
            Ok(output) => {
                converted += 1;
                println!("Generated JUnit XML: {}", output.display());
            }
            Err(e) => {
                skipped += 1;
                warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    println!("Conversion complete: {converted} converted, {skipped} skipped");
    Ok(())
}

fn convert_file(path: &Path) -> Result<PathBuf> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let report = loader::load_tolerant(&bytes)?;
    let xml = builder::convert(&report)?;

    let output = path.with_extension("xml");
    fs::write(&output, xml)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(output)
}

/// Eligible inputs are `*.json` files, excluding Playwright's `.last-run.json`
/// marker.
fn is_report_file(path: &Path) -> bool {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.ends_with(".json") && name != ".last-run.json",
        None => false,
    }
}
