//! Pass/fail reporting for an acceptance run.

pub mod console;
pub mod result;

pub use result::{is_critical, CheckResult, RunSummary, ScenarioResult, Verdict};

use anyhow::{Context, Result};
use std::path::Path;

/// Write the summary as pretty JSON.
pub fn write_json(summary: &RunSummary, path: &Path) -> Result<()> {
    let json = summary.to_json().context("Failed to serialize run summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
