//! Workspace layer of timetabler: configuration, file discovery and
//! loading/saving timetables on behalf of the CLI.

pub mod config;
pub mod discovery;
pub mod error;
pub mod workspace;

pub use config::{Config, StorageConfig, UiConfig, resolve_workspace_path};
pub use discovery::{SummaryEntry, TimetableSummary, discover_timetables, summarize_timetables};
pub use error::{Error, Result};
pub use workspace::{LOG_FILE, Workspace, WorkspaceOptions};
