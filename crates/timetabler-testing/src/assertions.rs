//! Assertions over saved timetable documents.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

const TOP_LEVEL_KEYS: [&str; 4] = ["name", "timetable", "subjects", "period_times"];

/// Read and parse a JSON file.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not JSON", path.display()))
}

/// Assert the document has the four top-level keys, in order, and five days.
pub fn assert_document_shape(doc: &Value) -> Result<()> {
    let map = doc.as_object().context("Expected a JSON object")?;
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    if keys != TOP_LEVEL_KEYS {
        anyhow::bail!("Expected top-level keys {:?}, got {:?}", TOP_LEVEL_KEYS, keys);
    }

    let days = doc["timetable"]
        .as_array()
        .context("Expected 'timetable' array")?;
    if days.len() != 5 {
        anyhow::bail!("Expected 5 days, got {}", days.len());
    }
    Ok(())
}

/// Assert the cell at (`day`, `slot`) holds the given subject id and room.
pub fn assert_period(doc: &Value, day: usize, slot: &str, subject: &str, room: &str) -> Result<()> {
    let cell = doc["timetable"]
        .get(day)
        .and_then(|d| d.get(slot))
        .with_context(|| format!("No period at day {} slot {}", day, slot))?;

    if cell["subject"] != subject || cell["room"] != room {
        anyhow::bail!(
            "Expected {}/{} at day {} slot {}, got {}",
            subject,
            room,
            day,
            slot,
            cell
        );
    }
    Ok(())
}

/// Assert that no `*.tmp` file is left in `dir`.
pub fn assert_no_temp_files(dir: &Path) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "tmp") {
            anyhow::bail!("Leftover temp file {}", path.display());
        }
    }
    Ok(())
}
