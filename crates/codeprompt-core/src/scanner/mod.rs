//! Scanner module - walks a project tree and produces `FileRecord`s.
//!
//! The walk itself runs on the calling thread; per-file work (binary sniff,
//! hashing, line counting) runs on a bounded worker pool.

mod ignores;
mod inspect;
mod walker;

pub use ignores::{IgnoreRules, PRESET_EXCLUDES};
pub use inspect::{SNIFF_LEN, count_lines, extension_of, is_binary_file};
pub use walker::{Scanner, walk_files};

use crate::Result;
use codeprompt_types::{FileRecord, ScanOptions};
use std::path::Path;

/// Load ignore rules for `root` and scan it with the default worker count.
pub fn scan_project(root: &Path, options: &ScanOptions) -> Result<Vec<FileRecord>> {
    let rules = IgnoreRules::from_options(root, options)?;
    Scanner::new(root, rules)
        .include_binary(options.include_binary)
        .scan()
}
