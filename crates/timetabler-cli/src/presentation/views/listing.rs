use owo_colors::OwoColorize;
use std::fmt;
use std::path::Path;
use timetabler_runtime::{SummaryEntry, TimetableSummary};

/// Output of `timetabler list`
pub struct TimetableListView<'a> {
    dir: &'a Path,
    entries: &'a [SummaryEntry],
    color: bool,
}

impl<'a> TimetableListView<'a> {
    pub fn new(dir: &'a Path, entries: &'a [SummaryEntry], color: bool) -> Self {
        Self {
            dir,
            entries,
            color,
        }
    }
}

impl fmt::Display for TimetableListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No timetables found in {}", self.dir.display());
        }

        writeln!(f, "Timetables in {}:", self.dir.display())?;
        let width = self
            .entries
            .iter()
            .map(|(path, _)| file_label(path).len())
            .max()
            .unwrap_or(0);

        for (path, entry) in self.entries {
            let label = format!("{:<width$}", file_label(path), width = width);
            match entry {
                Ok(summary) => {
                    let counts = format!(
                        "{} slots, {} subjects, {} periods",
                        summary.slots, summary.subjects, summary.periods
                    );
                    if self.color {
                        writeln!(f, "  {}  {}  {}", label.bold(), summary.name, counts.dimmed())?;
                    } else {
                        writeln!(f, "  {}  {}  {}", label, summary.name, counts)?;
                    }
                }
                Err(message) => {
                    if self.color {
                        writeln!(f, "  {}  {} {}", label.bold(), "invalid:".red(), message)?;
                    } else {
                        writeln!(f, "  {}  invalid: {}", label, message)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Output of `timetabler validate` for a file that loaded
pub struct ValidationView<'a> {
    summary: &'a TimetableSummary,
    color: bool,
}

impl<'a> ValidationView<'a> {
    pub fn new(summary: &'a TimetableSummary, color: bool) -> Self {
        Self { summary, color }
    }
}

impl fmt::Display for ValidationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        let head = format!("{} is valid", s.path.display());
        if self.color {
            writeln!(f, "{} {}", "✓".green(), head.bold())?;
        } else {
            writeln!(f, "{}", head)?;
        }
        writeln!(f, "  Name:     {}", s.name)?;
        writeln!(f, "  Slots:    {}", s.slots)?;
        writeln!(f, "  Subjects: {}", s.subjects)?;
        writeln!(f, "  Periods:  {}", s.periods)
    }
}
