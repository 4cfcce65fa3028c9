//! Ignore-rule resolver: root `.gitignore` plus preset exclusions for
//! dependency, build and version-control directories.

use crate::{Error, Result};
use codeprompt_types::ScanOptions;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use tracing::{debug, warn};

/// Directories skipped by default, wherever they appear in the tree
pub const PRESET_EXCLUDES: &[&str] = &[
    // Version control
    ".git",
    // Package managers
    "node_modules",
    "vendor",
    // Python
    "venv",
    ".venv",
    "__pycache__",
    ".pytest_cache",
    ".tox",
    "*.egg-info",
    // Build outputs
    "build",
    "dist",
    "target",
    ".gradle",
    // IDE/Editor
    ".idea",
    ".vscode",
];

/// Compiled ignore rules for one project root.
///
/// Both rule sets are optional; with neither active every path is accepted.
pub struct IgnoreRules {
    gitignore: Option<Gitignore>,
    presets: Option<Gitignore>,
}

impl IgnoreRules {
    /// Rules that accept every path
    pub fn none() -> Self {
        Self {
            gitignore: None,
            presets: None,
        }
    }

    pub fn from_options(root: &Path, options: &ScanOptions) -> Result<Self> {
        Self::load(root, !options.no_git_ignores, !options.no_preset_excludes)
    }

    /// Load `<root>/.gitignore` and/or the preset list.
    ///
    /// A missing `.gitignore` means no rules. A `.gitignore` with a pattern
    /// that does not compile also means no rules. Any other read failure is
    /// returned as a config error.
    pub fn load(root: &Path, use_gitignore: bool, use_presets: bool) -> Result<Self> {
        let gitignore = if use_gitignore {
            load_gitignore(root)?
        } else {
            None
        };

        let presets = if use_presets {
            Some(build_presets(root)?)
        } else {
            None
        };

        Ok(Self { gitignore, presets })
    }

    /// Whether the walker should skip `rel_path`.
    ///
    /// `rel_path` is relative to the root and `/`-separated. Paths inside an
    /// ignored directory are reported as ignored too.
    pub fn is_ignored(&self, rel_path: &str, is_dir: bool) -> bool {
        if rel_path.is_empty() {
            return false;
        }
        let path = Path::new(rel_path);
        [&self.presets, &self.gitignore]
            .into_iter()
            .flatten()
            .any(|gi| gi.matched_path_or_any_parents(path, is_dir).is_ignore())
    }

    pub fn has_gitignore(&self) -> bool {
        self.gitignore.is_some()
    }
}

fn load_gitignore(root: &Path) -> Result<Option<Gitignore>> {
    let path = root.join(".gitignore");
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::Config(format!(
                "failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };

    let content = String::from_utf8_lossy(&bytes);
    let mut builder = GitignoreBuilder::new(root);
    for line in content.lines() {
        if let Err(e) = builder.add_line(Some(path.clone()), line) {
            warn!(path = %path.display(), error = %e, "ignoring malformed .gitignore");
            return Ok(None);
        }
    }

    match builder.build() {
        Ok(gi) => {
            debug!(rules = gi.num_ignores(), "loaded .gitignore");
            Ok(Some(gi))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed .gitignore");
            Ok(None)
        }
    }
}

fn build_presets(root: &Path) -> Result<Gitignore> {
    let mut builder = GitignoreBuilder::new(root);
    for name in PRESET_EXCLUDES {
        builder
            .add_line(None, &format!("{}/", name))
            .map_err(|e| Error::Config(format!("invalid preset exclusion '{}': {}", name, e)))?;
    }
    builder
        .build()
        .map_err(|e| Error::Config(format!("failed to compile preset exclusions: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_presets_skip_dependency_dirs_anywhere() {
        let dir = TempDir::new().unwrap();
        let rules = IgnoreRules::load(dir.path(), false, true).unwrap();

        assert!(rules.is_ignored("node_modules", true));
        assert!(rules.is_ignored("web/node_modules", true));
        assert!(rules.is_ignored("vendor/b.go", false));
        assert!(rules.is_ignored("pkg/foo.egg-info", true));
        assert!(!rules.is_ignored("src/rebuild.go", false));
        assert!(!rules.is_ignored("a.go", false));
    }

    #[test]
    fn test_presets_only_match_directories() {
        let dir = TempDir::new().unwrap();
        let rules = IgnoreRules::load(dir.path(), false, true).unwrap();

        assert!(!rules.is_ignored("build", false));
        assert!(rules.is_ignored("build", true));
    }

    #[test]
    fn test_gitignore_rules() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "*.log\nsecret/\n!keep.log\n").unwrap();
        let rules = IgnoreRules::load(dir.path(), true, false).unwrap();

        assert!(rules.has_gitignore());
        assert!(rules.is_ignored("debug.log", false));
        assert!(rules.is_ignored("secret", true));
        assert!(rules.is_ignored("secret/key.pem", false));
        assert!(!rules.is_ignored("keep.log", false));
        assert!(!rules.is_ignored("main.go", false));
    }

    #[test]
    fn test_missing_gitignore_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let rules = IgnoreRules::load(dir.path(), true, false).unwrap();
        assert!(!rules.has_gitignore());
        assert!(!rules.is_ignored("anything.txt", false));
    }

    #[test]
    fn test_malformed_gitignore_degrades_to_no_rules() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "*.log\n[z-a]\n").unwrap();
        let rules = IgnoreRules::load(dir.path(), true, false).unwrap();

        assert!(!rules.has_gitignore());
        assert!(!rules.is_ignored("debug.log", false));
    }

    #[test]
    fn test_unreadable_gitignore_is_config_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".gitignore")).unwrap();
        let err = IgnoreRules::load(dir.path(), true, false)
            .err()
            .expect("directory in place of .gitignore should fail");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_no_rules_accepts_everything() {
        let rules = IgnoreRules::none();
        assert!(!rules.is_ignored("node_modules", true));
        assert!(!rules.is_ignored(".git/config", false));
    }
}
