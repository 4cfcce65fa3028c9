pub mod analyze;
pub mod content;
pub mod filter;
pub mod profile;
pub mod project;
pub mod refresh;
pub mod status;

pub use analyze::{
    AnalyzeService, ExtStats, FileEntry, NO_EXTENSION, StatsReport, SummaryReport, TreeNode,
    TreeStatus, build_tree,
};
pub use content::ContentService;
pub use filter::FilterSource;
pub use profile::ProfileService;
pub use project::ProjectService;
pub use refresh::{RefreshProgress, RefreshService};
pub use status::{StatusReport, StatusService};
