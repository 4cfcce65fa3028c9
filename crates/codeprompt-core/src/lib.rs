//! Engines behind the codeprompt cache: ignore rules, the concurrent
//! scanner, snapshot reconciliation and the filter engine. Nothing here
//! touches the database.

mod error;
pub mod filter;
pub mod path;
pub mod reconcile;
pub mod scanner;

pub use error::{Error, Result};
pub use filter::Filter;
pub use path::{expand_tilde, normalize_project_path, relative_key, resolve_data_dir};
pub use reconcile::{ChangeSet, reconcile};
pub use scanner::{
    IgnoreRules, PRESET_EXCLUDES, Scanner, is_binary_file, scan_project, walk_files,
};
