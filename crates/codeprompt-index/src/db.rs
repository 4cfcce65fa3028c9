use chrono::{SecondsFormat, Utc};
use codeprompt_types::{FileRecord, ProjectId, SnapshotEntry};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::queries::{file, profile, project};
use crate::records::{ExtensionStat, ProfileRecord, ProjectRecord, ProjectSummary};
use crate::schema;
use crate::{Error, Result};

/// Rows per multi-row INSERT / paths per DELETE ... IN (...)
pub const DEFAULT_BATCH_SIZE: usize = 100;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        let db = Self { conn };
        db.configure()?;
        db.init_schema()?;
        debug!(path = %db_path.display(), "opened cache database");
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.configure()?;
        db.init_schema()?;
        Ok(db)
    }

    fn configure(&self) -> Result<()> {
        self.conn.busy_timeout(BUSY_TIMEOUT)?;
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }

    pub fn init_schema(&self) -> Result<()> {
        schema::init_schema(&self.conn)
    }

    // Projects

    /// Look up a project by its normalized path, creating it on first reference.
    pub fn get_or_create_project(&self, project_path: &str) -> Result<ProjectRecord> {
        project::insert_if_missing(&self.conn, project_path)?;
        project::get_by_path(&self.conn, project_path)?.ok_or_else(|| {
            Error::Query(format!("project '{}' vanished after insert", project_path))
        })
    }

    pub fn find_project(&self, project_path: &str) -> Result<Option<ProjectRecord>> {
        project::get_by_path(&self.conn, project_path)
    }

    /// Like `find_project`, but a missing project is `Error::NotFound`.
    pub fn require_project(&self, project_path: &str) -> Result<ProjectRecord> {
        self.find_project(project_path)?.ok_or_else(|| {
            Error::NotFound(format!(
                "project '{}' not found; run 'cache update' or 'project add' first",
                project_path
            ))
        })
    }

    pub fn get_project(&self, id: ProjectId) -> Result<ProjectRecord> {
        project::get(&self.conn, id)?
            .ok_or_else(|| Error::NotFound(format!("project id {} not found", id)))
    }

    pub fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        project::list(&self.conn)
    }

    /// Delete a project together with its files and profiles.
    pub fn delete_project(&self, project_path: &str) -> Result<()> {
        if project::delete(&self.conn, project_path)? == 0 {
            return Err(Error::NotFound(format!(
                "project '{}' not found",
                project_path
            )));
        }
        Ok(())
    }

    /// Record a completed refresh. Call only after the file changes committed.
    pub fn mark_scanned(&self, id: ProjectId) -> Result<String> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        project::set_last_scan(&self.conn, id, &now)?;
        Ok(now)
    }

    // Files

    pub fn load_snapshot(&self, id: ProjectId) -> Result<HashMap<String, SnapshotEntry>> {
        file::snapshot(&self.conn, id)
    }

    /// Replace every cached file of a project in one transaction.
    pub fn replace_files(
        &self,
        id: ProjectId,
        records: &[FileRecord],
        batch_size: usize,
    ) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = file::delete_all(&tx, id)?;
        file::insert_batch(&tx, id, records, batch_size)?;
        tx.commit()?;

        debug!(
            project_id = %id,
            removed,
            inserted = records.len(),
            "replaced cached files"
        );
        Ok(())
    }

    /// Apply reconciliation results in one transaction.
    ///
    /// Any failure rolls back all three sets and leaves the previous
    /// snapshot in place.
    pub fn apply_changes(
        &self,
        id: ProjectId,
        inserts: &[FileRecord],
        updates: &[FileRecord],
        deletes: &[String],
        batch_size: usize,
    ) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        file::insert_batch(&tx, id, inserts, batch_size)?;
        file::update_each(&tx, id, updates)?;
        file::delete_batch(&tx, id, deletes, batch_size)?;
        tx.commit()?;

        debug!(
            project_id = %id,
            inserted = inserts.len(),
            updated = updates.len(),
            deleted = deletes.len(),
            "applied cache changes"
        );
        Ok(())
    }

    /// All cached files of a project, ordered by relative path.
    pub fn list_files(&self, id: ProjectId) -> Result<Vec<FileRecord>> {
        file::list(&self.conn, id)
    }

    /// Cached files for `paths`, ordered by relative path.
    pub fn get_files(&self, id: ProjectId, paths: &[&str]) -> Result<Vec<FileRecord>> {
        file::get_many(&self.conn, id, paths, DEFAULT_BATCH_SIZE)
    }

    pub fn list_paths(&self, id: ProjectId) -> Result<Vec<String>> {
        file::paths(&self.conn, id)
    }

    pub fn count_files(&self, id: ProjectId) -> Result<usize> {
        file::count(&self.conn, id)
    }

    pub fn extension_stats(&self, id: ProjectId) -> Result<Vec<ExtensionStat>> {
        file::extension_stats(&self.conn, id)
    }

    // Profiles

    pub fn save_profile(&self, id: ProjectId, name: &str, data_json: &str) -> Result<()> {
        profile::upsert(&self.conn, id, name, data_json)
    }

    pub fn load_profile(&self, id: ProjectId, name: &str) -> Result<String> {
        profile::get(&self.conn, id, name)?.ok_or_else(|| {
            Error::NotFound(format!("profile '{}' not found for this project", name))
        })
    }

    pub fn delete_profile(&self, id: ProjectId, name: &str) -> Result<()> {
        if profile::delete(&self.conn, id, name)? == 0 {
            return Err(Error::NotFound(format!(
                "profile '{}' not found for this project",
                name
            )));
        }
        Ok(())
    }

    pub fn list_profiles(&self, id: ProjectId) -> Result<Vec<ProfileRecord>> {
        profile::list(&self.conn, id)
    }
}
