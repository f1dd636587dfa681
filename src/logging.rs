//! Diagnostic logging.
//!
//! Diagnostics go to stderr through `tracing`; the pass/fail report is printed
//! on stdout separately so it can be piped or captured on its own.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "ROOMCHECK_LOG";

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "roomcheck=debug,warn"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Calling it twice is harmless; the second
/// install is ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
