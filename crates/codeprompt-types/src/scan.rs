use serde::{Deserialize, Serialize};
use std::fmt;

/// Options for one cache refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Reconcile against the stored snapshot instead of replacing it
    pub incremental: bool,
    /// Keep files whose first bytes contain a NUL
    pub include_binary: bool,
    /// Ignore the project's root `.gitignore`
    pub no_git_ignores: bool,
    /// Disable the built-in dependency/build directory exclusions
    pub no_preset_excludes: bool,
}

impl ScanOptions {
    pub fn mode(&self) -> RefreshMode {
        if self.incremental {
            RefreshMode::Incremental
        } else {
            RefreshMode::Full
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshMode {
    Full,
    Incremental,
}

impl fmt::Display for RefreshMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshMode::Full => write!(f, "full"),
            RefreshMode::Incremental => write!(f, "incremental"),
        }
    }
}

/// Counts reported by an incremental refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementalSummary {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub total_scanned: usize,
}

impl IncrementalSummary {
    pub fn is_up_to_date(&self) -> bool {
        self.added == 0 && self.modified == 0 && self.deleted == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum RefreshOutcome {
    #[serde(rename = "cache updated (full scan)")]
    Full { scanned: usize },
    #[serde(rename = "cache updated (incremental scan)")]
    Incremental(IncrementalSummary),
    #[serde(rename = "cache is up-to-date")]
    UpToDate(IncrementalSummary),
}

impl RefreshOutcome {
    pub fn incremental(summary: IncrementalSummary) -> Self {
        if summary.is_up_to_date() {
            RefreshOutcome::UpToDate(summary)
        } else {
            RefreshOutcome::Incremental(summary)
        }
    }

    pub fn scanned(&self) -> usize {
        match self {
            RefreshOutcome::Full { scanned } => *scanned,
            RefreshOutcome::Incremental(s) | RefreshOutcome::UpToDate(s) => s.total_scanned,
        }
    }
}
