//! Run command - executes the acceptance plan against a backend

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::{Overrides, RunConfig};
use crate::logging;
use crate::report::{self, console::render_summary, RunSummary};
use crate::runner::Runner;

/// Options for a run, as collected by the CLI.
#[derive(Debug, Default)]
pub struct RunArgs {
    pub base_url: Option<String>,
    pub config: Option<PathBuf>,
    pub resubmit_delay_ms: Option<u64>,
    pub quiet: bool,
    pub report: Option<PathBuf>,
    pub verbose: bool,
}

/// Execute the run command and hand back the summary; the caller turns it
/// into the process exit code.
pub fn execute(args: RunArgs) -> Result<RunSummary> {
    logging::init(args.verbose);

    let overrides = Overrides {
        base_url: args.base_url,
        resubmit_delay_ms: args.resubmit_delay_ms,
        quiet: args.quiet,
    };
    let config = RunConfig::load(args.config.as_deref(), &overrides)?;

    let summary = run_with_config(config)?;
    println!("{}", render_summary(&summary));

    if let Some(path) = args.report.as_deref() {
        write_report(&summary, path)?;
    }

    Ok(summary)
}

/// Run the full plan with an already resolved configuration.
pub fn run_with_config(config: RunConfig) -> Result<RunSummary> {
    let mut runner = Runner::new(config)?;
    Ok(runner.run())
}

fn write_report(summary: &RunSummary, path: &Path) -> Result<()> {
    report::write_json(summary, path)?;
    println!("{} Report written to {}", "✓".green().bold(), path.display());
    Ok(())
}
