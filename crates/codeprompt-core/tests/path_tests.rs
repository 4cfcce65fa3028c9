use codeprompt_core::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_normalize_existing_path_is_canonical() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("proj");
    std::fs::create_dir(&nested).unwrap();

    let with_dots = format!("{}/./proj/../proj/", dir.path().display());
    let normalized = normalize_project_path(&with_dots).unwrap();
    assert_eq!(normalized.as_path(), nested.canonicalize().unwrap());
}

#[test]
fn test_normalize_missing_path_is_absolute() {
    let normalized = normalize_project_path("/definitely/not/./here/../there").unwrap();
    assert_eq!(normalized.as_path(), PathBuf::from("/definitely/not/there"));
}

#[test]
fn test_normalize_relative_path_joins_cwd() {
    let normalized = normalize_project_path("some-missing-project-dir").unwrap();
    assert!(normalized.as_path().is_absolute());
    assert!(normalized.as_path().ends_with("some-missing-project-dir"));
}

#[test]
fn test_resolve_data_dir_explicit_wins() {
    let result = resolve_data_dir(Some("/explicit/data")).unwrap();
    assert_eq!(result, PathBuf::from("/explicit/data"));
}

#[test]
fn test_expand_tilde() {
    if let Some(home) = std::env::var_os("HOME") {
        assert_eq!(expand_tilde("~/x"), PathBuf::from(home).join("x"));
    }
    assert_eq!(expand_tilde("/abs/x"), PathBuf::from("/abs/x"));
}
