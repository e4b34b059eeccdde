//! JSON document codec for timetables.
//!
//! ```text
//! {
//!     "name": "...",
//!     "timetable": [ { "<slot>": { "subject": "<id>", "room": "..." } }, ... ],
//!     "subjects": { "<id>": { "name": "...", "teacher": "..." } },
//!     "period_times": { "<slot>": { "name": "...", "start": "HHMM", "end": "HHMM" } }
//! }
//! ```
//!
//! Object key order is significant for `period_times` (it is the row order of
//! the grid) and is preserved in both directions.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::{DAY_COUNT, DaySchedule, Period, PeriodTime, Subject, SubjectCatalog, Timetable};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    timetable: Vec<Map<String, Value>>,
    subjects: Map<String, Value>,
    period_times: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawSubject {
    name: Option<String>,
    teacher: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPeriod {
    subject: Option<String>,
    room: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPeriodTime {
    name: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

/// Parse a timetable document. `file_path` is remembered for later saves.
pub fn parse_document(json: &str, file_path: impl Into<PathBuf>) -> Result<Timetable> {
    let raw: RawDocument = serde_json::from_str(json)?;

    let mut subjects = SubjectCatalog::new();
    for (id, value) in raw.subjects {
        let entry: RawSubject = serde_json::from_value(value)?;
        let (Some(name), Some(teacher)) = (entry.name, entry.teacher) else {
            return Err(Error::invalid(format!("subject '{}' has no name or teacher", id)));
        };
        subjects.upsert(Subject::new(id, name, teacher));
    }

    let mut period_times = Vec::with_capacity(raw.period_times.len());
    for (slot_key, value) in raw.period_times {
        let entry: RawPeriodTime = serde_json::from_value(value)?;
        let (Some(name), Some(start), Some(end)) = (entry.name, entry.start, entry.end) else {
            return Err(Error::invalid(format!("period time '{}' is missing data", slot_key)));
        };
        period_times.push(PeriodTime::new(slot_key, name, start, end));
    }

    let mut days = Vec::with_capacity(DAY_COUNT);
    for (day_index, day) in raw.timetable.into_iter().enumerate() {
        if day_index >= DAY_COUNT {
            // Older creators wrote a trailing empty day; tolerate it, but never
            // drop scheduled periods silently.
            if !day.is_empty() {
                return Err(Error::invalid(format!(
                    "day {} has periods but a week only has {} days",
                    day_index, DAY_COUNT
                )));
            }
            continue;
        }

        let mut schedule = DaySchedule::new();
        for (slot_key, value) in day {
            let entry: RawPeriod = serde_json::from_value(value)?;
            let (Some(subject), Some(room)) = (entry.subject, entry.room) else {
                return Err(Error::invalid(format!(
                    "period '{}' has no subject or room for day {}",
                    slot_key, day_index
                )));
            };
            if !subjects.contains(&subject.as_str().into()) {
                return Err(Error::invalid(format!(
                    "period '{}' on day {} references unknown subject '{}'",
                    slot_key, day_index, subject
                )));
            }
            schedule.insert(slot_key, Period::new(subject, room));
        }
        days.push(schedule);
    }
    days.resize_with(DAY_COUNT, DaySchedule::new);

    Timetable::from_parts(raw.name, file_path, days, subjects, period_times)
}

/// Build the JSON value for a timetable.
///
/// Cells within a day are written in row order, not key order.
pub fn to_document(timetable: &Timetable) -> Value {
    let days: Vec<Value> = timetable
        .days()
        .iter()
        .map(|day| {
            let mut cells = Map::new();
            for slot in timetable.period_times() {
                if let Some(period) = day.get(&slot.slot_key) {
                    cells.insert(
                        slot.slot_key.clone(),
                        json!({ "subject": period.subject.as_str(), "room": period.room }),
                    );
                }
            }
            Value::Object(cells)
        })
        .collect();

    let mut subjects = Map::new();
    for subject in timetable.subjects() {
        subjects.insert(
            subject.id.to_string(),
            json!({ "name": subject.name, "teacher": subject.teacher }),
        );
    }

    let mut period_times = Map::new();
    for slot in timetable.period_times() {
        period_times.insert(
            slot.slot_key.clone(),
            json!({ "name": slot.name, "start": slot.start, "end": slot.end }),
        );
    }

    let mut document = Map::new();
    document.insert("name".to_string(), Value::String(timetable.name().to_string()));
    document.insert("timetable".to_string(), Value::Array(days));
    document.insert("subjects".to_string(), Value::Object(subjects));
    document.insert("period_times".to_string(), Value::Object(period_times));
    Value::Object(document)
}

/// Serialize a timetable as pretty JSON with four-space indentation.
pub fn render_document(timetable: &Timetable) -> Result<String> {
    let value = to_document(timetable);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| Error::invalid(e.to_string()))
}

impl Timetable {
    /// Read and validate a timetable file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        parse_document(&content, path)
    }

    /// Write the whole timetable to its file path.
    ///
    /// The document is written to a sibling temporary file and renamed over
    /// the target, so an interrupted save leaves the previous file intact.
    pub fn save(&self) -> Result<()> {
        let content = render_document(self)?;
        write_replacing(self.file_path(), content.as_bytes())
    }
}

fn write_replacing(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "timetable".into());
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result.map_err(Error::from)
}
