// SQLite cache store
// One flat snapshot of file metadata per project, plus saved filter profiles

mod db;
mod error;
mod queries;
mod records;
mod schema;

// Public API
pub use db::{DEFAULT_BATCH_SIZE, Database};
pub use error::{Error, Result};
pub use records::{ExtensionStat, ProfileRecord, ProjectRecord, ProjectSummary};
pub use schema::SCHEMA_VERSION;
