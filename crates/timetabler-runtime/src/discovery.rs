//! Finding timetable documents in the data directory.

use std::path::{Path, PathBuf};

use timetabler_types::Timetable;
use walkdir::WalkDir;

use crate::Result;

/// `*.json` files directly inside `dir`, sorted by path.
///
/// A missing directory yields an empty list.
pub fn discover_timetables(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "data directory does not exist");
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// One-line facts about a timetable file, for listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableSummary {
    pub path: PathBuf,
    pub name: String,
    pub slots: usize,
    pub subjects: usize,
    pub periods: usize,
}

impl TimetableSummary {
    pub fn of(timetable: &Timetable) -> Self {
        Self {
            path: timetable.file_path().to_path_buf(),
            name: timetable.name().to_string(),
            slots: timetable.period_times().len(),
            subjects: timetable.subjects().len(),
            periods: timetable.period_count(),
        }
    }
}

/// A discovered file and its summary, or why it failed to load
pub type SummaryEntry = (PathBuf, std::result::Result<TimetableSummary, String>);

/// Load every discovered file; unreadable files carry their error message.
pub fn summarize_timetables(dir: &Path) -> Result<Vec<SummaryEntry>> {
    let files = discover_timetables(dir)?;
    Ok(files
        .into_iter()
        .map(|path| {
            let summary = Timetable::load(&path)
                .map(|t| TimetableSummary::of(&t))
                .map_err(|e| e.to_string());
            (path, summary)
        })
        .collect())
}
