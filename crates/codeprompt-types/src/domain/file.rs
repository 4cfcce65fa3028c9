use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached metadata for one file of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the project root, always `/`-separated
    pub relative_path: String,
    pub filename: String,
    /// Text after the last dot of the filename, without the dot; empty if none
    pub extension: String,
    pub size_bytes: u64,
    /// Newline-delimited lines; 0 for binary files
    pub line_count: u64,
    pub is_text: bool,
    pub last_mod_time: DateTime<Utc>,
    /// SHA-256 of the raw bytes, lowercase hex
    pub content_hash: String,
}

impl FileRecord {
    pub fn staleness_key(&self) -> SnapshotEntry {
        SnapshotEntry {
            last_mod_time: self.last_mod_time,
            content_hash: self.content_hash.clone(),
        }
    }
}

/// Persisted staleness key of a cached file, keyed by relative path in a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub last_mod_time: DateTime<Utc>,
    pub content_hash: String,
}
