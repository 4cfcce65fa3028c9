use codeprompt_types::{FileRecord, SnapshotEntry};
use std::collections::{HashMap, HashSet};

/// Difference between a live scan and the stored snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Live files with no stored row
    pub to_insert: Vec<FileRecord>,
    /// Live files whose modification time or hash differs from the stored row
    pub to_update: Vec<FileRecord>,
    /// Stored paths no longer present on disk
    pub to_delete: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// Partition `live` against `snapshot` by relative path.
///
/// A file is unchanged only when both its modification time and its content
/// hash equal the stored values, so touching a file without editing it
/// still lands in `to_update`. All three lists are sorted by path.
pub fn reconcile(snapshot: &HashMap<String, SnapshotEntry>, live: Vec<FileRecord>) -> ChangeSet {
    let mut changes = ChangeSet::default();
    let mut seen: HashSet<String> = HashSet::with_capacity(live.len());

    for record in live {
        seen.insert(record.relative_path.clone());
        match snapshot.get(&record.relative_path) {
            None => changes.to_insert.push(record),
            Some(stored) => {
                if stored.last_mod_time != record.last_mod_time
                    || stored.content_hash != record.content_hash
                {
                    changes.to_update.push(record);
                }
            }
        }
    }

    changes.to_delete = snapshot
        .keys()
        .filter(|path| !seen.contains(*path))
        .cloned()
        .collect();

    changes
        .to_insert
        .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    changes
        .to_update
        .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    changes.to_delete.sort();
    changes
}
