mod args;
mod commands;
pub mod context;
mod handlers;
pub mod logging;
pub mod output;
pub mod types;

pub use args::{
    AnalyzeCommand, CacheCommand, Cli, Commands, ContentCommand, ProfilesCommand, ProjectCommand,
};
pub use commands::run;
