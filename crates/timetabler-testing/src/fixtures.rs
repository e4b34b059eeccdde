//! Sample timetable documents.

use serde_json::{Value, json};
use std::path::Path;
use timetabler_types::{Period, PeriodTime, Subject, SubjectCatalog, Timetable};

/// Three slots, two subjects and one scheduled period (Wednesday, slot "1").
pub fn sample_document() -> Value {
    json!({
        "name": "Year 10",
        "timetable": [
            {},
            {},
            { "1": { "subject": "m", "room": "204" } },
            {},
            {}
        ],
        "subjects": {
            "m": { "name": "Maths", "teacher": "Smith" },
            "e": { "name": "English", "teacher": "Jones" }
        },
        "period_times": {
            "0": { "name": "Period 1", "start": "0900", "end": "0945" },
            "1": { "name": "Period 2", "start": "0945", "end": "1030" },
            "2": { "name": "Period 3", "start": "1045", "end": "1130" }
        }
    })
}

/// A period that references a subject missing from the catalog.
pub fn dangling_subject_document() -> Value {
    let mut doc = sample_document();
    doc["timetable"][0] = json!({ "0": { "subject": "ghost", "room": "1" } });
    doc
}

/// Valid JSON that lacks the `period_times` key.
pub fn incomplete_document() -> Value {
    let mut doc = sample_document();
    if let Some(map) = doc.as_object_mut() {
        map.remove("period_times");
    }
    doc
}

/// The same content as [`sample_document`], built through the model.
pub fn sample_timetable(path: &Path) -> timetabler_types::Result<Timetable> {
    let subjects: SubjectCatalog = vec![
        Subject::new("m", "Maths", "Smith"),
        Subject::new("e", "English", "Jones"),
    ]
    .into_iter()
    .collect();
    let period_times = vec![
        PeriodTime::new("0", "Period 1", "0900", "0945"),
        PeriodTime::new("1", "Period 2", "0945", "1030"),
        PeriodTime::new("2", "Period 3", "1045", "1130"),
    ];
    let mut timetable = Timetable::new("Year 10", path, subjects, period_times);
    timetable.set_period(2, "1", Period::new("m", "204"))?;
    Ok(timetable)
}
