use codeprompt_types::{NOT_SCANNED_YET, ProjectId};
use serde::Serialize;

/// Project row from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    /// Row id, referenced by files and profiles.
    pub id: ProjectId,
    /// Absolute, normalized project directory.
    pub project_path: String,
    /// RFC 3339 time of the last committed refresh, or `not_scanned_yet`.
    pub last_scan_timestamp: String,
}

impl ProjectRecord {
    pub fn is_scanned(&self) -> bool {
        self.last_scan_timestamp != NOT_SCANNED_YET
    }
}

/// Project row with its cached file count, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub project_path: String,
    pub last_scan_timestamp: String,
    pub file_count: usize,
}

/// Saved filter profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    pub name: String,
    /// Filter specification exactly as saved.
    pub data_json: String,
}

/// Per-extension aggregate over a project's cached files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionStat {
    /// Extension without the dot; empty for files without one.
    pub extension: String,
    pub file_count: usize,
    pub total_size: u64,
    pub total_lines: u64,
}
