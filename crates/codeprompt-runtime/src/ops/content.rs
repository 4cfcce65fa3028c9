use super::analyze::AnalyzeService;
use super::filter::FilterSource;
use crate::Result;
use codeprompt_core::normalize_project_path;
use std::collections::BTreeMap;
use tracing::debug;

/// Reads the current on-disk content of the files a filter selects.
pub struct ContentService<'a> {
    analyze: AnalyzeService<'a>,
}

impl<'a> ContentService<'a> {
    pub fn new(db: &'a codeprompt_index::Database) -> Self {
        Self {
            analyze: AnalyzeService::new(db),
        }
    }

    /// Map of relative path to file content.
    ///
    /// A file that cannot be read maps to an error string instead of
    /// failing the whole request.
    pub fn get(&self, raw_path: &str, source: &FilterSource) -> Result<BTreeMap<String, String>> {
        let root = normalize_project_path(raw_path)?;
        let paths = self.analyze.filtered_paths(raw_path, source)?;

        let mut contents = BTreeMap::new();
        for relative_path in paths {
            let full_path = root.as_path().join(&relative_path);
            let text = match std::fs::read(&full_path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    debug!(path = %full_path.display(), error = %e, "unreadable cached file");
                    format!("Error: Unable to read file. {}", e)
                }
            };
            contents.insert(relative_path, text);
        }
        Ok(contents)
    }
}
