use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a subject within one timetable
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SubjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A reusable course definition, e.g. Maths taught by Smith.
///
/// Periods refer to a subject by [`SubjectId`], so renaming a subject is
/// visible in every cell it is scheduled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub teacher: String,
}

impl Subject {
    pub fn new(id: impl Into<SubjectId>, name: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            teacher: teacher.into(),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.teacher.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.teacher)
        }
    }
}

/// Subjects of one timetable, kept in insertion order.
///
/// Lookups are linear; a weekly timetable holds a few dozen subjects at most.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectCatalog {
    subjects: Vec<Subject>,
}

impl SubjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| &s.id == id)
    }

    pub fn contains(&self, id: &SubjectId) -> bool {
        self.get(id).is_some()
    }

    /// Insert a subject, replacing the one with the same id in place.
    ///
    /// Returns `true` when an existing subject was replaced.
    pub fn upsert(&mut self, subject: Subject) -> bool {
        match self.subjects.iter_mut().find(|s| s.id == subject.id) {
            Some(existing) => {
                *existing = subject;
                true
            }
            None => {
                self.subjects.push(subject);
                false
            }
        }
    }

    pub fn remove(&mut self, id: &SubjectId) -> Option<Subject> {
        let index = self.subjects.iter().position(|s| &s.id == id)?;
        Some(self.subjects.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subject> {
        self.subjects.iter()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl FromIterator<Subject> for SubjectCatalog {
    fn from_iter<I: IntoIterator<Item = Subject>>(iter: I) -> Self {
        let mut catalog = SubjectCatalog::new();
        for subject in iter {
            catalog.upsert(subject);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a SubjectCatalog {
    type Item = &'a Subject;
    type IntoIter = std::slice::Iter<'a, Subject>;

    fn into_iter(self) -> Self::IntoIter {
        self.subjects.iter()
    }
}
