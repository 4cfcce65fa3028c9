pub mod domain;
pub mod filter;
pub mod scan;

pub use domain::*;
pub use filter::{FilterSpec, Precedence};
pub use scan::{IncrementalSummary, RefreshMode, RefreshOutcome, ScanOptions};
