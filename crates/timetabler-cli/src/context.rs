use anyhow::{Context, Result};
use std::path::Path;
use timetabler_runtime::{Workspace, WorkspaceOptions};

use crate::args::Cli;

/// Everything a handler needs: the resolved workspace and its config.
pub struct AppContext {
    workspace: Workspace,
}

impl AppContext {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let workspace = Workspace::open(WorkspaceOptions {
            root: cli.workspace.clone(),
            config_path: cli.config.clone(),
            data_dir: cli.data_dir.clone(),
        })
        .context("Failed to open workspace")?;
        Ok(Self::new(workspace))
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn data_dir(&self) -> &Path {
        self.workspace.data_dir()
    }

    pub fn list_height(&self) -> usize {
        self.workspace.list_height()
    }
}
