mod commands;
mod common;

pub use commands::*;
pub use common::*;

use crate::types::LogLevel;
use clap::Parser;

#[derive(Parser)]
#[command(name = "codeprompt")]
#[command(
    about = "Cache a project's file metadata and query it with include/exclude filters",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Data directory; falls back to $CODEPROMPT_PATH, then the platform data directory
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Database file; defaults to <data-dir>/codeprompt.db
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Log verbosity on stderr; RUST_LOG overrides it
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}
