use std::fmt;

/// Result type for timetabler-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading or writing timetables
#[derive(Debug)]
pub enum Error {
    /// The document is not a valid timetable (bad JSON, missing fields,
    /// dangling references)
    InvalidData(String),

    /// IO operation failed
    Io(std::io::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidData(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidData(msg) => write!(f, "Invalid timetable data: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(format!("invalid JSON: {}", err))
    }
}
