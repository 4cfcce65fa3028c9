mod file;
mod project;

pub use file::{FileRecord, SnapshotEntry};
pub use project::{NOT_SCANNED_YET, ProjectId, ProjectPath};
