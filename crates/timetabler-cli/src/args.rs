use crate::types::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "timetabler")]
#[command(about = "View, edit and create weekly class timetables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Workspace directory holding config.toml and the log file
    /// [default: $TIMETABLER_PATH, else the platform data directory]
    #[arg(long, global = true)]
    pub workspace: Option<String>,

    /// Directory with timetable files [default: <workspace>/data]
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Config file to use instead of <workspace>/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a timetable file in the viewer
    Open { path: PathBuf },

    /// Create a new timetable with the wizard
    New,

    /// List timetables in the data directory
    List,

    /// Check that a timetable file loads cleanly
    Validate { path: PathBuf },
}
