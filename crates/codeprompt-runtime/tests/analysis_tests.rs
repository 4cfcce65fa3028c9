use codeprompt_core::normalize_project_path;
use codeprompt_index::Database;
use codeprompt_runtime::{
    AnalyzeService, ContentService, FilterSource, ProfileService, ProjectService, RefreshService,
};
use codeprompt_types::ScanOptions;
use std::fs;
use tempfile::TempDir;

fn scanned() -> (TempDir, String, Database) {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("cmd")).unwrap();
    fs::write(dir.path().join("cmd/root.go"), "package cmd\n").unwrap();
    fs::write(dir.path().join("main.go"), "package main\n").unwrap();
    fs::write(dir.path().join("README.md"), "# readme\n").unwrap();

    let raw = dir.path().to_string_lossy().to_string();
    let db = Database::open_in_memory().unwrap();
    let path = normalize_project_path(&raw).unwrap();
    RefreshService::new(&db, 100)
        .run(&path, &ScanOptions::default(), |_| {})
        .unwrap();
    (dir, raw, db)
}

#[test]
fn test_saved_profile_drives_analysis() {
    let (_dir, raw, db) = scanned();
    ProfileService::new(&db)
        .save(&raw, "code", r#"{"includePaths":["cmd/"]}"#)
        .unwrap();

    let paths = AnalyzeService::new(&db)
        .filtered_paths(&raw, &FilterSource::profile("code"))
        .unwrap();
    assert_eq!(paths, vec!["cmd/root.go"]);
}

#[test]
fn test_content_matches_summary_selection() {
    let (_dir, raw, db) = scanned();
    let source = FilterSource::inline(r#"{"excludeExts":["md"],"priority":"excludes"}"#);

    let summary = AnalyzeService::new(&db).summary(&raw, &source).unwrap();
    let contents = ContentService::new(&db).get(&raw, &source).unwrap();

    let summary_paths: Vec<&str> = summary
        .files
        .iter()
        .map(|f| f.relative_path.as_str())
        .collect();
    let content_paths: Vec<&str> = contents.keys().map(String::as_str).collect();
    assert_eq!(summary_paths, content_paths);
    assert_eq!(content_paths, vec!["cmd/root.go", "main.go"]);
    assert_eq!(contents["main.go"], "package main\n");
}

#[test]
fn test_deleted_project_takes_profiles_along() {
    let (_dir, raw, db) = scanned();
    ProfileService::new(&db).save(&raw, "all", "{}").unwrap();

    ProjectService::new(&db).delete(&raw).unwrap();

    assert!(ProfileService::new(&db).list(&raw).unwrap_err().is_not_found());
    assert!(AnalyzeService::new(&db).stats(&raw).unwrap_err().is_not_found());
}

#[test]
fn test_added_project_has_empty_analysis() {
    let dir = TempDir::new().unwrap();
    let raw = dir.path().to_string_lossy().to_string();
    let db = Database::open_in_memory().unwrap();
    ProjectService::new(&db).add(&raw).unwrap();

    let stats = AnalyzeService::new(&db).stats(&raw).unwrap();
    assert_eq!(stats.total_files, 0);
    let tree = AnalyzeService::new(&db)
        .tree(&raw, &FilterSource::default())
        .unwrap();
    assert!(tree.children.is_empty());
    assert_eq!(tree.total_file_count, Some(0));
}
