use crate::{Error, Result};
use codeprompt_core::{Filter, normalize_project_path};
use codeprompt_index::{Database, ProfileRecord};
use tracing::info;

/// Named filter specifications stored per project.
pub struct ProfileService<'a> {
    db: &'a Database,
}

impl<'a> ProfileService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Validate `data_json` as a filter and store it under `name`.
    ///
    /// Creates the project if needed; an existing profile is overwritten.
    pub fn save(&self, raw_path: &str, name: &str, data_json: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Config("profile name must not be empty".to_string()));
        }
        Filter::from_json(data_json)?;

        let path = normalize_project_path(raw_path)?;
        let project = self.db.get_or_create_project(&path.to_key())?;
        self.db.save_profile(project.id, name, data_json)?;
        info!(project = %path, profile = name, "profile saved");
        Ok(())
    }

    /// Stored JSON of a profile, exactly as saved
    pub fn load(&self, raw_path: &str, name: &str) -> Result<String> {
        let path = normalize_project_path(raw_path)?;
        let project = self.db.require_project(&path.to_key())?;
        Ok(self.db.load_profile(project.id, name)?)
    }

    pub fn delete(&self, raw_path: &str, name: &str) -> Result<()> {
        let path = normalize_project_path(raw_path)?;
        let project = self.db.require_project(&path.to_key())?;
        Ok(self.db.delete_profile(project.id, name)?)
    }

    pub fn list(&self, raw_path: &str) -> Result<Vec<ProfileRecord>> {
        let path = normalize_project_path(raw_path)?;
        let project = self.db.require_project(&path.to_key())?;
        Ok(self.db.list_profiles(project.id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn raw(dir: &TempDir) -> String {
        dir.path().to_string_lossy().to_string()
    }

    #[test]
    fn test_save_creates_project_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        let service = ProfileService::new(&db);
        let json = r#"{"includeExts":["go"],"priority":"excludes"}"#;

        service.save(&raw(&dir), "go", json).unwrap();
        assert_eq!(service.load(&raw(&dir), "go").unwrap(), json);

        let names: Vec<String> = service
            .list(&raw(&dir))
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["go"]);
    }

    #[test]
    fn test_invalid_pattern_is_rejected_before_write() {
        let dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        let service = ProfileService::new(&db);

        let err = service
            .save(&raw(&dir), "bad", r#"{"includeRegex":["("]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Core(codeprompt_core::Error::InvalidPattern { .. })
        ));
        assert!(db.list_projects().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        let err = ProfileService::new(&db)
            .save(&raw(&dir), "bad", "{not json")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Core(codeprompt_core::Error::InvalidFilterSpec(_))
        ));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        let err = ProfileService::new(&db)
            .save(&raw(&dir), "  ", "{}")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_profile_is_not_found() {
        let dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        let service = ProfileService::new(&db);
        service.save(&raw(&dir), "a", "{}").unwrap();

        assert!(service.load(&raw(&dir), "b").unwrap_err().is_not_found());
        assert!(service.delete(&raw(&dir), "b").unwrap_err().is_not_found());
        service.delete(&raw(&dir), "a").unwrap();
        assert!(service.list(&raw(&dir)).unwrap().is_empty());
    }
}
