pub mod analyze;
pub mod cache;
pub mod content;
pub mod profiles;
pub mod project;
