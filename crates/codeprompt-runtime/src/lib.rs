//! Services that wire the scan, reconcile and filter engines to the
//! SQLite store: cache refresh and status, projects, profiles, analysis
//! and content retrieval.

pub mod config;
pub mod error;
pub mod ops;

pub use config::{Config, StoreConfig};
pub use error::{Error, Result};
pub use ops::{
    AnalyzeService, ContentService, ExtStats, FileEntry, FilterSource, NO_EXTENSION,
    ProfileService, ProjectService, RefreshProgress, RefreshService, StatsReport, StatusReport,
    StatusService, SummaryReport, TreeNode, TreeStatus,
};
