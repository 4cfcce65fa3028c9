use crate::Result;
use codeprompt_index::DEFAULT_BATCH_SIZE;
use codeprompt_types::ScanOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Rows per batched INSERT and paths per batched DELETE
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Contents of `<data-dir>/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    /// Defaults for `cache update`; command-line flags can only switch these on
    #[serde(default)]
    pub scan: ScanOptions,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Batch size clamped to at least one row
    pub fn batch_size(&self) -> usize {
        self.store.batch_size.max(1)
    }

    /// Merge command-line flags over the configured scan defaults
    pub fn scan_options(&self, flags: ScanOptions) -> ScanOptions {
        ScanOptions {
            incremental: self.scan.incremental || flags.incremental,
            include_binary: self.scan.include_binary || flags.include_binary,
            no_git_ignores: self.scan.no_git_ignores || flags.no_git_ignores,
            no_preset_excludes: self.scan.no_preset_excludes || flags.no_preset_excludes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.batch_size(), 100);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = Config::default();
        config.store.batch_size = 25;
        config.scan.incremental = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scan]\ninclude_binary = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.scan.include_binary);
        assert!(!config.scan.incremental);
        assert_eq!(config.store.batch_size, 100);
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store]\nbatch_size = 0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.batch_size(), 1);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_flags_only_switch_on() {
        let mut config = Config::default();
        config.scan.no_git_ignores = true;

        let merged = config.scan_options(ScanOptions {
            incremental: true,
            ..Default::default()
        });
        assert!(merged.incremental);
        assert!(merged.no_git_ignores);
        assert!(!merged.include_binary);
    }
}
