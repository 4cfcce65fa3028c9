use crate::Result;
use codeprompt_core::normalize_project_path;
use codeprompt_index::{Database, ProjectRecord, ProjectSummary};
use codeprompt_types::ProjectPath;

pub struct ProjectService<'a> {
    db: &'a Database,
}

impl<'a> ProjectService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a project without scanning it. Adding twice is a no-op.
    pub fn add(&self, raw_path: &str) -> Result<ProjectRecord> {
        let path = normalize_project_path(raw_path)?;
        Ok(self.db.get_or_create_project(&path.to_key())?)
    }

    pub fn list(&self) -> Result<Vec<ProjectSummary>> {
        Ok(self.db.list_projects()?)
    }

    /// Remove a project together with its files and profiles
    pub fn delete(&self, raw_path: &str) -> Result<ProjectPath> {
        let path = normalize_project_path(raw_path)?;
        self.db.delete_project(&path.to_key())?;
        Ok(path)
    }

    /// Look up an existing project; NotFound if it was never added or scanned
    pub fn require(&self, raw_path: &str) -> Result<(ProjectPath, ProjectRecord)> {
        let path = normalize_project_path(raw_path)?;
        let record = self.db.require_project(&path.to_key())?;
        Ok((path, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        let service = ProjectService::new(&db);
        let raw = dir.path().to_string_lossy().to_string();

        let first = service.add(&raw).unwrap();
        let second = service.add(&format!("{}/", raw)).unwrap();
        assert_eq!(first.id, second.id);
        assert!(!first.is_scanned());
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        let err = ProjectService::new(&db)
            .delete(&dir.path().to_string_lossy())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_require_after_add() {
        let dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        let service = ProjectService::new(&db);
        let raw = dir.path().to_string_lossy().to_string();

        assert!(service.require(&raw).unwrap_err().is_not_found());
        service.add(&raw).unwrap();
        let (path, record) = service.require(&raw).unwrap();
        assert_eq!(record.project_path, path.to_key());
    }
}
