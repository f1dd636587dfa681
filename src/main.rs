use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use roomcheck::commands::run::RunArgs;
use roomcheck::commands::{completions, list, run};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "roomcheck")]
#[command(about = "End-to-end acceptance checks for the test platform API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every scenario against the backend
    Run {
        /// API base URL (overrides config file and ROOMCHECK_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Path to a TOML config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pause between the first submit and the resubmit, in milliseconds
        #[arg(long)]
        resubmit_delay_ms: Option<u64>,

        /// Print only the final summary
        #[arg(short, long)]
        quiet: bool,

        /// Write a JSON report to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Debug logging for roomcheck (ROOMCHECK_LOG takes precedence)
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the scenarios in execution order
    List,

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    match dispatch(Cli::parse()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<u8> {
    match cli.command {
        Commands::Run {
            base_url,
            config,
            resubmit_delay_ms,
            quiet,
            report,
            verbose,
        } => run::execute(RunArgs {
            base_url,
            config,
            resubmit_delay_ms,
            quiet,
            report,
            verbose,
        })
        .map(|summary| summary.exit_code()),
        Commands::List => {
            list::execute();
            Ok(0)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            completions::execute(&mut cmd, shell);
            Ok(0)
        }
    }
}
