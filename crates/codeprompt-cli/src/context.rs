use anyhow::Result;
use codeprompt_core::{expand_tilde, resolve_data_dir};
use codeprompt_index::Database;
use codeprompt_runtime::Config;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lazily opened database and config shared by one command invocation.
pub struct ExecutionContext {
    data_dir: PathBuf,
    db_path: PathBuf,
    db: OnceCell<Database>,
    config: OnceCell<Config>,
}

impl ExecutionContext {
    pub fn new(data_dir: Option<&str>, db: Option<&str>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir)?;
        let db_path = match db {
            Some(path) => expand_tilde(path),
            None => data_dir.join("codeprompt.db"),
        };
        debug!(data_dir = %data_dir.display(), db = %db_path.display(), "resolved paths");

        Ok(Self {
            data_dir,
            db_path,
            db: OnceCell::new(),
            config: OnceCell::new(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn db(&self) -> Result<&Database> {
        self.db
            .get_or_try_init(|| -> Result<Database> { Ok(Database::open(&self.db_path)?) })
    }

    pub fn config(&self) -> Result<&Config> {
        self.config.get_or_try_init(|| -> Result<Config> {
            let config_path = self.data_dir.join("config.toml");
            Ok(Config::load_from(&config_path)?)
        })
    }
}
