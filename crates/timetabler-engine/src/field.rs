//! Inline field editor: a bounded string buffer fed one key at a time.

use crate::key::Key;

/// Character class a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharFilter {
    /// Printable ASCII (`!` to `~`) and space
    FreeText,
    /// Free text without path separators; the value becomes a file name
    FileName,
    /// ASCII digits
    Digits,
    /// A single digit from 3 to 6
    PeriodCount,
}

impl CharFilter {
    pub fn accepts(self, c: char) -> bool {
        match self {
            CharFilter::FreeText => c == ' ' || ('!'..='~').contains(&c),
            CharFilter::FileName => CharFilter::FreeText.accepts(c) && c != '/' && c != '\\',
            CharFilter::Digits => c.is_ascii_digit(),
            CharFilter::PeriodCount => ('3'..='6').contains(&c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub filter: CharFilter,
    pub max_len: usize,
}

impl FieldSpec {
    pub const fn new(filter: CharFilter, max_len: usize) -> Self {
        Self { filter, max_len }
    }
}

/// Every editable field of every screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Room,
    TimetableName,
    PeriodCount,
    SlotStart(usize),
    SlotEnd(usize),
    SubjectName,
    Teacher,
}

impl FieldId {
    pub fn spec(self) -> FieldSpec {
        match self {
            FieldId::Room => FieldSpec::new(CharFilter::FreeText, 10),
            FieldId::TimetableName => FieldSpec::new(CharFilter::FileName, 30),
            FieldId::PeriodCount => FieldSpec::new(CharFilter::PeriodCount, 1),
            FieldId::SlotStart(_) | FieldId::SlotEnd(_) => FieldSpec::new(CharFilter::Digits, 4),
            FieldId::SubjectName | FieldId::Teacher => FieldSpec::new(CharFilter::FreeText, 20),
        }
    }
}

/// Apply one key to `buffer`. Returns `true` if the buffer changed.
///
/// Accepted characters are appended while the buffer is shorter than
/// `max_len`; backspace drops the last character. Every other key is a no-op.
pub fn apply_key(buffer: &mut String, key: Key, spec: FieldSpec) -> bool {
    match key {
        Key::Char(c) if spec.filter.accepts(c) && buffer.chars().count() < spec.max_len => {
            buffer.push(c);
            true
        }
        Key::Backspace => buffer.pop().is_some(),
        _ => false,
    }
}
