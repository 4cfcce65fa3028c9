//! TestWorld pattern for declarative integration test setup.

use anyhow::{Context, Result};
use assert_cmd::Command;
use filetime::FileTime;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated environment: a temp root holding a data directory and one
/// project tree.
///
/// # Example
/// ```no_run
/// use codeprompt_testing::TestWorld;
///
/// let world = TestWorld::new()
///     .with_file("main.go", "package main\n")
///     .with_file("vendor/lib.go", "package lib\n");
///
/// let result = world.run_on_project(&["cache", "update"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    project_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".codeprompt");
        let project_dir = temp_dir.path().join("project");

        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        std::fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        Self {
            temp_dir,
            data_dir,
            project_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Project path as passed to `--project-path`
    pub fn project_arg(&self) -> String {
        self.project_dir.to_string_lossy().to_string()
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write a text file relative to the project root.
    pub fn with_file(self, rel_path: &str, content: &str) -> Self {
        self.write_file(rel_path, content.as_bytes())
            .expect("Failed to write project file");
        self
    }

    /// Write a file whose first bytes contain a NUL.
    pub fn with_binary(self, rel_path: &str) -> Self {
        self.write_file(rel_path, &[0x89, b'P', b'N', b'G', 0, 0, 0, 13])
            .expect("Failed to write binary file");
        self
    }

    /// Write `config.toml` into the data directory.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(self.data_dir.join("config.toml"), toml).expect("Failed to write config");
        self
    }

    pub fn write_file(&self, rel_path: &str, content: &[u8]) -> Result<()> {
        let path = self.project_dir.join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn remove_file(&self, rel_path: &str) -> Result<()> {
        std::fs::remove_file(self.project_dir.join(rel_path))?;
        Ok(())
    }

    /// Set a file's modification time without touching its content.
    pub fn touch(&self, rel_path: &str, unix_seconds: i64, nanos: u32) -> Result<()> {
        filetime::set_file_mtime(
            self.project_dir.join(rel_path),
            FileTime::from_unix_time(unix_seconds, nanos),
        )?;
        Ok(())
    }

    /// Configure a CLI command with this environment's data dir and env vars.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the binary with `args` and capture its output.
    ///
    /// Uses `Command::cargo_bin()`, which needs the `CARGO_BIN_EXE_` variable
    /// that cargo test sets.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("codeprompt")
            .map_err(|e| anyhow::anyhow!("Failed to find codeprompt binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Like `run`, with `--project-path <project>` appended.
    pub fn run_on_project(&self, args: &[&str]) -> Result<CliResult> {
        let project = self.project_arg();
        let mut full: Vec<&str> = args.to_vec();
        full.push("--project-path");
        full.push(&project);
        self.run(&full)
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.stdout)
            .with_context(|| format!("stdout is not JSON: {}", self.stdout))
    }

    /// The `data` member of a success envelope.
    pub fn data(&self) -> Result<serde_json::Value> {
        crate::assertions::success_data(&self.json()?)
    }

    /// Parse stderr as a JSON error envelope.
    pub fn error_json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(self.stderr.trim())
            .with_context(|| format!("stderr is not JSON: {}", self.stderr))
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
