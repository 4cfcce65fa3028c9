use crate::Result;
use codeprompt_core::Filter;
use codeprompt_index::Database;
use codeprompt_types::{FilterSpec, ProjectId};

/// Where an analysis command takes its filter from.
///
/// A saved profile wins over an inline document; neither selects everything.
#[derive(Debug, Clone, Default)]
pub struct FilterSource {
    pub profile_name: Option<String>,
    pub filter_json: Option<String>,
    /// Legacy comma-separated regex lists, merged into the resolved spec
    pub raw: Option<FilterSpec>,
}

impl FilterSource {
    pub fn inline(json: impl Into<String>) -> Self {
        Self {
            filter_json: Some(json.into()),
            ..Self::default()
        }
    }

    pub fn profile(name: impl Into<String>) -> Self {
        Self {
            profile_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn resolve(&self, db: &Database, project_id: ProjectId) -> Result<Filter> {
        let document = match (&self.profile_name, &self.filter_json) {
            (Some(name), _) if !name.trim().is_empty() => {
                Some(db.load_profile(project_id, name.trim())?)
            }
            (_, Some(json)) if !json.trim().is_empty() => Some(json.clone()),
            _ => None,
        };

        let mut spec = match document {
            Some(json) => FilterSpec::from_json(&json).map_err(codeprompt_core::Error::from)?,
            None => FilterSpec::default(),
        };

        if let Some(raw) = &self.raw {
            spec.includes.extend(raw.includes.iter().cloned());
            spec.excludes.extend(raw.excludes.iter().cloned());
            if document_is_absent(&self.filter_json, &self.profile_name) {
                spec.priority = raw.priority;
            }
        }

        Ok(Filter::compile(&spec)?)
    }
}

fn document_is_absent(json: &Option<String>, profile: &Option<String>) -> bool {
    let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
    blank(json) && blank(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeprompt_types::Precedence;

    fn project(db: &Database) -> ProjectId {
        db.get_or_create_project("/p").unwrap().id
    }

    #[test]
    fn test_nothing_selects_everything() {
        let db = Database::open_in_memory().unwrap();
        let filter = FilterSource::default().resolve(&db, project(&db)).unwrap();
        assert!(filter.is_empty());
        assert!(filter.is_included("any/file.txt"));
    }

    #[test]
    fn test_profile_wins_over_inline() {
        let db = Database::open_in_memory().unwrap();
        let id = project(&db);
        db.save_profile(id, "md", r#"{"includeExts":["md"]}"#).unwrap();

        let source = FilterSource {
            profile_name: Some("md".into()),
            filter_json: Some(r#"{"includeExts":["go"]}"#.into()),
            raw: None,
        };
        let filter = source.resolve(&db, id).unwrap();
        assert!(filter.is_included("README.md"));
        assert!(!filter.is_included("main.go"));
    }

    #[test]
    fn test_profile_is_loaded() {
        let db = Database::open_in_memory().unwrap();
        let id = project(&db);
        db.save_profile(id, "md", r#"{"includeExts":["md"]}"#).unwrap();

        let filter = FilterSource::profile("md").resolve(&db, id).unwrap();
        assert!(filter.is_included("README.md"));
        assert!(!filter.is_included("main.go"));
    }

    #[test]
    fn test_missing_profile_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let id = project(&db);
        let err = FilterSource::profile("nope").resolve(&db, id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_raw_lists_carry_their_priority() {
        let db = Database::open_in_memory().unwrap();
        let source = FilterSource {
            raw: Some(FilterSpec::from_raw_lists(
                r"\.go$",
                "^vendor/",
                Precedence::Excludes,
            )),
            ..Default::default()
        };
        let filter = source.resolve(&db, project(&db)).unwrap();
        assert_eq!(filter.precedence(), Precedence::Excludes);
        assert!(filter.is_included("main.go"));
        assert!(!filter.is_included("vendor/x.go"));
    }

    #[test]
    fn test_raw_lists_merge_into_inline_document() {
        let db = Database::open_in_memory().unwrap();
        let source = FilterSource {
            filter_json: Some(r#"{"includeExts":["go"]}"#.into()),
            raw: Some(FilterSpec::from_raw_lists(r"\.md$", "", Precedence::Includes)),
            ..Default::default()
        };
        let filter = source.resolve(&db, project(&db)).unwrap();
        assert!(filter.is_included("main.go"));
        assert!(filter.is_included("README.md"));
        assert!(!filter.is_included("a.txt"));
    }
}
