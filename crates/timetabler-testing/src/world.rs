//! TestWorld pattern for declarative integration test setup.

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated workspace for running the `timetabler` binary.
///
/// # Example
/// ```no_run
/// use timetabler_testing::{TestWorld, fixtures};
///
/// let world = TestWorld::new();
/// world.write_document("year_10.json", &fixtures::sample_document()).unwrap();
///
/// let result = world.run(&["list"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    workspace: PathBuf,
    data_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = temp_dir.path().join(".timetabler");
        let data_dir = workspace.join("data");

        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            workspace,
            data_dir,
            env_vars: HashMap::new(),
        }
    }

    /// Workspace directory holding config and log file.
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Default timetable directory (`<workspace>/data`).
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write `config.toml` into the workspace.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(self.workspace.join("config.toml"), toml).expect("Failed to write config");
        self
    }

    /// Write a document into the data directory and return its path.
    pub fn write_document(&self, file_name: &str, doc: &Value) -> Result<PathBuf> {
        let content = serde_json::to_string_pretty(doc)?;
        self.write_raw(file_name, &content)
    }

    /// Write arbitrary content into the data directory.
    pub fn write_raw(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.data_dir.join(file_name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--workspace").arg(&self.workspace);
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("TIMETABLER_PATH");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run the `timetabler` binary with `args` and capture its output.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("timetabler")
            .map_err(|e| anyhow::anyhow!("Failed to find timetabler binary: {}", e))?;
        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI execution.
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

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
