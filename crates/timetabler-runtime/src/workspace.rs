use std::path::{Path, PathBuf};

use timetabler_types::Timetable;

use crate::config::{CONFIG_FILE, Config, expand_tilde, resolve_workspace_path};
use crate::discovery::{SummaryEntry, discover_timetables, summarize_timetables};
use crate::{Error, Result};

/// Name of the log file inside the workspace directory
pub const LOG_FILE: &str = "timetabler.log";

/// Overrides collected from the command line
#[derive(Debug, Clone, Default)]
pub struct WorkspaceOptions {
    pub root: Option<String>,
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<String>,
}

/// Resolved workspace: where config, logs and timetables live.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: Config,
    data_dir: PathBuf,
}

impl Workspace {
    pub fn open(options: WorkspaceOptions) -> Result<Self> {
        let root = resolve_workspace_path(options.root.as_deref())?;
        let config_path = options
            .config_path
            .unwrap_or_else(|| root.join(CONFIG_FILE));
        let config = Config::load_from(&config_path)?;
        let data_dir = match options.data_dir {
            Some(dir) => expand_tilde(&dir),
            None => config.data_dir(&root),
        };

        tracing::debug!(
            root = %root.display(),
            config = %config_path.display(),
            data_dir = %data_dir.display(),
            "workspace opened"
        );
        Ok(Self {
            root,
            config,
            data_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn list_height(&self) -> usize {
        self.config.ui.list_height
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        discover_timetables(&self.data_dir)
    }

    pub fn summaries(&self) -> Result<Vec<SummaryEntry>> {
        summarize_timetables(&self.data_dir)
    }

    /// Load a timetable the user pointed at.
    pub fn open_timetable(&self, path: &Path) -> Result<Timetable> {
        if !path.is_file() {
            return Err(Error::InvalidFile(path.to_path_buf()));
        }
        let timetable = Timetable::load(path)?;
        tracing::info!(
            path = %path.display(),
            name = %timetable.name(),
            periods = timetable.period_count(),
            "timetable loaded"
        );
        Ok(timetable)
    }

    /// Write a timetable to its own file path.
    pub fn save(&self, timetable: &Timetable) -> Result<()> {
        timetable.save().inspect_err(|e| {
            tracing::error!(path = %timetable.file_path().display(), error = %e, "save failed");
        })?;
        tracing::info!(path = %timetable.file_path().display(), "timetable saved");
        Ok(())
    }
}
