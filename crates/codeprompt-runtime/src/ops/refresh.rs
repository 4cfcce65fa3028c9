use crate::Result;
use codeprompt_core::{reconcile, scan_project};
use codeprompt_index::Database;
use codeprompt_types::{IncrementalSummary, ProjectPath, RefreshMode, RefreshOutcome, ScanOptions};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefreshProgress {
    Started {
        project_path: String,
        mode: RefreshMode,
    },
    ScanFinished {
        scanned: usize,
    },
    SnapshotLoaded {
        records: usize,
    },
    ChangesComputed {
        added: usize,
        modified: usize,
        deleted: usize,
    },
    UpToDate,
    Committed {
        timestamp: String,
    },
}

pub struct RefreshService<'a> {
    db: &'a Database,
    batch_size: usize,
}

impl<'a> RefreshService<'a> {
    pub fn new(db: &'a Database, batch_size: usize) -> Self {
        Self {
            db,
            batch_size: batch_size.max(1),
        }
    }

    /// Bring the cached snapshot of `project_path` in line with the disk.
    ///
    /// The tree is scanned before anything is written, so a failing walk
    /// leaves the store untouched. File changes commit in one transaction;
    /// the scan timestamp advances only after that commit.
    pub fn run<F>(
        &self,
        project_path: &ProjectPath,
        options: &ScanOptions,
        mut on_progress: F,
    ) -> Result<RefreshOutcome>
    where
        F: FnMut(RefreshProgress),
    {
        let key = project_path.to_key();
        let mode = options.mode();

        on_progress(RefreshProgress::Started {
            project_path: key.clone(),
            mode,
        });

        let records = scan_project(project_path.as_path(), options)?;
        let scanned = records.len();
        on_progress(RefreshProgress::ScanFinished { scanned });

        let project = self.db.get_or_create_project(&key)?;

        let outcome = match mode {
            RefreshMode::Full => {
                self.db
                    .replace_files(project.id, &records, self.batch_size)?;
                RefreshOutcome::Full { scanned }
            }
            RefreshMode::Incremental => {
                let snapshot = self.db.load_snapshot(project.id)?;
                on_progress(RefreshProgress::SnapshotLoaded {
                    records: snapshot.len(),
                });

                let changes = reconcile(&snapshot, records);
                let summary = IncrementalSummary {
                    added: changes.to_insert.len(),
                    modified: changes.to_update.len(),
                    deleted: changes.to_delete.len(),
                    total_scanned: scanned,
                };
                on_progress(RefreshProgress::ChangesComputed {
                    added: summary.added,
                    modified: summary.modified,
                    deleted: summary.deleted,
                });

                if changes.is_empty() {
                    on_progress(RefreshProgress::UpToDate);
                } else {
                    self.db.apply_changes(
                        project.id,
                        &changes.to_insert,
                        &changes.to_update,
                        &changes.to_delete,
                        self.batch_size,
                    )?;
                }
                RefreshOutcome::incremental(summary)
            }
        };

        let timestamp = self.db.mark_scanned(project.id)?;
        info!(project = %key, %mode, scanned, "cache refreshed");
        on_progress(RefreshProgress::Committed { timestamp });

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ProjectPath, Database) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), "pub fn f() {}\n").unwrap();
        let path = ProjectPath::new(dir.path().canonicalize().unwrap());
        let db = Database::open_in_memory().unwrap();
        (dir, path, db)
    }

    #[test]
    fn test_full_refresh_reports_events_in_order() {
        let (_dir, path, db) = setup();
        let mut events = Vec::new();

        let outcome = RefreshService::new(&db, 100)
            .run(&path, &ScanOptions::default(), |e| events.push(e))
            .unwrap();

        assert_eq!(outcome, RefreshOutcome::Full { scanned: 2 });
        assert!(matches!(
            events[0],
            RefreshProgress::Started {
                mode: RefreshMode::Full,
                ..
            }
        ));
        assert_eq!(events[1], RefreshProgress::ScanFinished { scanned: 2 });
        assert!(matches!(events[2], RefreshProgress::Committed { .. }));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_incremental_without_changes_is_up_to_date() {
        let (_dir, path, db) = setup();
        let service = RefreshService::new(&db, 100);
        service
            .run(&path, &ScanOptions::default(), |_| {})
            .unwrap();

        let options = ScanOptions {
            incremental: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        let outcome = service.run(&path, &options, |e| events.push(e)).unwrap();

        assert!(matches!(outcome, RefreshOutcome::UpToDate(s) if s.total_scanned == 2));
        assert!(events.contains(&RefreshProgress::UpToDate));
        assert!(events.contains(&RefreshProgress::SnapshotLoaded { records: 2 }));
    }

    #[test]
    fn test_missing_root_leaves_store_untouched() {
        let (dir, path, db) = setup();
        let missing = ProjectPath::new(dir.path().join("gone"));

        let err = RefreshService::new(&db, 100)
            .run(&missing, &ScanOptions::default(), |_| {})
            .unwrap_err();
        assert!(matches!(err, crate::Error::Core(_)));
        assert!(db.find_project(&missing.to_key()).unwrap().is_none());
        assert!(db.find_project(&path.to_key()).unwrap().is_none());
    }

    #[test]
    fn test_progress_serializes_with_kind_tag() {
        let json = serde_json::to_value(RefreshProgress::ChangesComputed {
            added: 1,
            modified: 0,
            deleted: 2,
        })
        .unwrap();
        assert_eq!(json["kind"], "changes_computed");
        assert_eq!(json["deleted"], 2);
    }
}
