use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{Period, PeriodTime, Subject, SubjectCatalog, SubjectId};
use crate::{Error, Result};

/// Number of day-slots in a week (Monday to Friday)
pub const DAY_COUNT: usize = 5;

/// Column headers of the grid, indexed by day
pub const DAY_NAMES: [&str; DAY_COUNT] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Periods of a single day keyed by slot key. Absent keys are free slots.
pub type DaySchedule = BTreeMap<String, Period>;

/// A whole weekly timetable.
///
/// Invariants held by every constructor and mutator:
/// - there are exactly [`DAY_COUNT`] day-slots
/// - every period names a subject present in the catalog
/// - every period sits in a slot listed in `period_times`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    name: String,
    file_path: PathBuf,
    days: Vec<DaySchedule>,
    subjects: SubjectCatalog,
    period_times: Vec<PeriodTime>,
}

impl Timetable {
    /// Create a timetable with no scheduled periods.
    pub fn new(
        name: impl Into<String>,
        file_path: impl Into<PathBuf>,
        subjects: SubjectCatalog,
        period_times: Vec<PeriodTime>,
    ) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            days: vec![DaySchedule::new(); DAY_COUNT],
            subjects,
            period_times,
        }
    }

    /// Assemble a timetable from already-parsed parts, checking references.
    pub fn from_parts(
        name: impl Into<String>,
        file_path: impl Into<PathBuf>,
        days: Vec<DaySchedule>,
        subjects: SubjectCatalog,
        period_times: Vec<PeriodTime>,
    ) -> Result<Self> {
        if days.len() != DAY_COUNT {
            return Err(Error::invalid(format!(
                "expected {} days, got {}",
                DAY_COUNT,
                days.len()
            )));
        }

        let mut timetable = Self::new(name, file_path, subjects, period_times);
        for (day_index, day) in days.into_iter().enumerate() {
            for (slot_key, period) in day {
                timetable.set_period(day_index, &slot_key, period)?;
            }
        }
        Ok(timetable)
    }

    /// File name a timetable called `name` is saved under,
    /// e.g. `"Year 10 Term 1"` -> `"year_10_term_1.json"`.
    pub fn file_name_for(name: &str) -> String {
        format!("{}.json", name.to_lowercase().replace(' ', "_"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = path.into();
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    pub fn subjects(&self) -> &SubjectCatalog {
        &self.subjects
    }

    pub fn subject(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.get(id)
    }

    /// Slots in row order
    pub fn period_times(&self) -> &[PeriodTime] {
        &self.period_times
    }

    /// Slot key of the grid row at `row`
    pub fn slot_key_at(&self, row: usize) -> Option<&str> {
        self.period_times.get(row).map(|p| p.slot_key.as_str())
    }

    /// Row index of the slot named `slot_key`
    pub fn slot_row(&self, slot_key: &str) -> Option<usize> {
        self.period_times.iter().position(|p| p.slot_key == slot_key)
    }

    pub fn period_at(&self, day: usize, slot_key: &str) -> Option<&Period> {
        self.days.get(day).and_then(|d| d.get(slot_key))
    }

    /// Schedule `period` in the given cell, returning whatever was there.
    pub fn set_period(
        &mut self,
        day: usize,
        slot_key: &str,
        period: Period,
    ) -> Result<Option<Period>> {
        if day >= DAY_COUNT {
            return Err(Error::invalid(format!("day index {} is out of range", day)));
        }
        if self.slot_row(slot_key).is_none() {
            return Err(Error::invalid(format!(
                "period slot '{}' on day {} has no period time",
                slot_key, day
            )));
        }
        if !self.subjects.contains(&period.subject) {
            return Err(Error::invalid(format!(
                "period slot '{}' on day {} references unknown subject '{}'",
                slot_key, day, period.subject
            )));
        }
        Ok(self.days[day].insert(slot_key.to_string(), period))
    }

    /// Free the given cell, returning the removed period if there was one.
    pub fn clear_period(&mut self, day: usize, slot_key: &str) -> Option<Period> {
        self.days.get_mut(day).and_then(|d| d.remove(slot_key))
    }

    /// Add or replace a subject in the catalog.
    pub fn upsert_subject(&mut self, subject: Subject) -> bool {
        self.subjects.upsert(subject)
    }

    /// Remove a subject and every period scheduled with it.
    ///
    /// Returns the removed subject and the number of cells that were cleared.
    pub fn remove_subject(&mut self, id: &SubjectId) -> Option<(Subject, usize)> {
        let subject = self.subjects.remove(id)?;
        let mut cleared = 0;
        for day in &mut self.days {
            let before = day.len();
            day.retain(|_, period| &period.subject != id);
            cleared += before - day.len();
        }
        Some((subject, cleared))
    }

    /// Number of populated cells across the week
    pub fn period_count(&self) -> usize {
        self.days.iter().map(|d| d.len()).sum()
    }
}
