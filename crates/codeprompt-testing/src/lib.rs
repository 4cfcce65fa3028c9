//! Testing infrastructure for codeprompt integration tests.
//!
//! - `TestWorld`: isolated data directory plus a project tree to scan
//! - `assertions`: checks over the JSON envelopes the CLI prints

pub mod assertions;
pub mod world;

pub use world::{CliResult, TestWorld};
