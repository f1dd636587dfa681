pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod logging;
pub mod models;
pub mod report;
pub mod runner;
pub mod scenarios;
pub mod utils;

/// Banner printed at the top of a run
pub const BANNER: &str = "roomcheck · test platform acceptance run";
