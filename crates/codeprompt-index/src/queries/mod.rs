pub mod file;
pub mod profile;
pub mod project;
