use chrono::NaiveTime;

use super::SubjectId;

/// A scheduled class occupying one cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub subject: SubjectId,
    pub room: String,
}

impl Period {
    pub fn new(subject: impl Into<SubjectId>, room: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            room: room.into(),
        }
    }
}

/// Name and bounds of one slot (grid row), e.g. "Period 1", 0845 to 0930.
///
/// `start` and `end` are kept exactly as entered. They are meant to be
/// 24-hour `HHMM` strings but are never rejected for being something else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTime {
    pub slot_key: String,
    pub name: String,
    pub start: String,
    pub end: String,
}

impl PeriodTime {
    pub fn new(
        slot_key: impl Into<String>,
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            slot_key: slot_key.into(),
            name: name.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// Start time formatted for display (`0845` -> `08:45`)
    pub fn display_start(&self) -> String {
        display_time(&self.start)
    }

    /// End time formatted for display
    pub fn display_end(&self) -> String {
        display_time(&self.end)
    }
}

/// Format an `HHMM` string as `HH:MM`; anything that is not a valid clock
/// time is returned unchanged.
pub fn display_time(raw: &str) -> String {
    if raw.len() != 4 {
        return raw.to_string();
    }
    match NaiveTime::parse_from_str(raw, "%H%M") {
        Ok(time) => time.format("%H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_time_formats_valid_hhmm() {
        assert_eq!(display_time("0845"), "08:45");
        assert_eq!(display_time("2359"), "23:59");
    }

    #[test]
    fn test_display_time_keeps_invalid_input() {
        assert_eq!(display_time("2460"), "2460");
        assert_eq!(display_time("930"), "930");
        assert_eq!(display_time(""), "");
    }

    #[test]
    fn test_period_time_display_helpers() {
        let slot = PeriodTime::new("0", "Period 1", "0900", "0945");
        assert_eq!(slot.display_start(), "09:00");
        assert_eq!(slot.display_end(), "09:45");
    }
}
