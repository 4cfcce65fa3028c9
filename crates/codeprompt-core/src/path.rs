use crate::{Error, Result};
use codeprompt_types::ProjectPath;
use std::path::{Component, Path, PathBuf};

/// Resolve the data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CODEPROMPT_PATH environment variable (with tilde expansion)
/// 3. System data directory
/// 4. ~/.codeprompt
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("CODEPROMPT_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("codeprompt"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".codeprompt"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or system data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~"
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home);
    }
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Turn a user-supplied project path into the absolute key used by the store.
///
/// Existing paths are canonicalized. Paths that do not exist (yet) are made
/// absolute against the current directory and cleaned lexically, so deleting
/// a project whose directory is gone still finds its row.
pub fn normalize_project_path(path: &str) -> Result<ProjectPath> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(Error::Config("project path is required".to_string()));
    }

    let expanded = expand_tilde(trimmed);
    if let Ok(canonical) = expanded.canonicalize() {
        return Ok(ProjectPath::new(canonical));
    }

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };
    Ok(ProjectPath::new(clean(&absolute)))
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Relative key of `path` under `root`, joined with `/` on every platform
pub fn relative_key(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_key_uses_forward_slashes() {
        let root = Path::new("/proj");
        let path = Path::new("/proj/src/cmd/main.go");
        assert_eq!(relative_key(root, path), "src/cmd/main.go");
    }

    #[test]
    fn test_clean_resolves_dot_segments() {
        let cleaned = clean(Path::new("/a/./b/../c"));
        assert_eq!(cleaned, PathBuf::from("/a/c"));
    }

    #[test]
    fn test_empty_project_path_is_config_error() {
        let err = normalize_project_path("  ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
