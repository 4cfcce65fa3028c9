use crate::Result;
use chrono::{DateTime, Utc};
use codeprompt_core::{IgnoreRules, is_binary_file, walk_files};
use codeprompt_index::Database;
use codeprompt_types::{ProjectPath, ScanOptions};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub is_stale: bool,
}

/// Read-only staleness probe. Compares modification times only, so it
/// never hashes file contents.
pub struct StatusService<'a> {
    db: &'a Database,
}

impl<'a> StatusService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn check(&self, project_path: &ProjectPath, options: &ScanOptions) -> Result<StatusReport> {
        let key = project_path.to_key();
        let project = match self.db.find_project(&key)? {
            Some(p) if p.is_scanned() => p,
            _ => {
                debug!(project = %key, "project never scanned");
                return Ok(StatusReport { is_stale: true });
            }
        };

        let snapshot = self.db.load_snapshot(project.id)?;
        if !project_path.as_path().is_dir() {
            return Ok(StatusReport {
                is_stale: !snapshot.is_empty(),
            });
        }
        let rules = IgnoreRules::from_options(project_path.as_path(), options)?;

        let mut seen: HashSet<String> = HashSet::with_capacity(snapshot.len());
        let mut stale = false;

        walk_files(project_path.as_path(), &rules, |path, relative_path| {
            match snapshot.get(&relative_path) {
                Some(stored) => {
                    let modified = std::fs::metadata(&path)
                        .and_then(|m| m.modified())
                        .map(DateTime::<Utc>::from);
                    match modified {
                        Ok(mtime) if mtime == stored.last_mod_time => {
                            seen.insert(relative_path);
                            Ok(true)
                        }
                        _ => {
                            debug!(path = %relative_path, "modified since last scan");
                            stale = true;
                            Ok(false)
                        }
                    }
                }
                None => {
                    // A refresh would drop these too.
                    match is_binary_file(&path) {
                        Err(e) => {
                            debug!(path = %relative_path, error = %e, "skipping unreadable file");
                            return Ok(true);
                        }
                        Ok(true) if !options.include_binary => return Ok(true),
                        Ok(_) => {}
                    }
                    debug!(path = %relative_path, "new file since last scan");
                    stale = true;
                    Ok(false)
                }
            }
        })?;

        if !stale && seen.len() != snapshot.len() {
            debug!(
                missing = snapshot.len() - seen.len(),
                "cached files no longer on disk"
            );
            stale = true;
        }

        Ok(StatusReport { is_stale: stale })
    }
}
