//! Domain model of a weekly class timetable and its JSON document format.

pub mod document;
pub mod domain;
pub mod error;

pub use document::{parse_document, render_document, to_document};
pub use domain::*;
pub use error::{Error, Result};
