use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file inside the workspace directory
pub const CONFIG_FILE: &str = "config.toml";

/// Default number of visible rows in menu lists
pub const DEFAULT_LIST_HEIGHT: usize = 15;

/// Menu rows that fit the smallest supported terminal (90x30) together with
/// the header, status bar and both scroll indicators
pub const MAX_LIST_HEIGHT: usize = 22;

/// Resolve the workspace directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. TIMETABLER_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.timetabler
pub fn resolve_workspace_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("TIMETABLER_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("timetabler"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".timetabler"));
    }

    Err(Error::Config(
        "Could not determine workspace path: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding timetable files; `<workspace>/data` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_list_height")]
    pub list_height: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            list_height: DEFAULT_LIST_HEIGHT,
        }
    }
}

fn default_list_height() -> usize {
    DEFAULT_LIST_HEIGHT
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
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

    /// Timetable directory for a workspace rooted at `workspace`
    pub fn data_dir(&self, workspace: &Path) -> PathBuf {
        match &self.storage.data_dir {
            Some(dir) => expand_tilde(dir),
            None => workspace.join("data"),
        }
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_LIST_HEIGHT).contains(&self.ui.list_height) {
            return Err(Error::Config(format!(
                "ui.list_height must be between 1 and {}",
                MAX_LIST_HEIGHT
            )));
        }
        Ok(())
    }
}
