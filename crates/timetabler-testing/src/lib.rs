//! Testing infrastructure for timetabler integration tests.
//!
//! - `TestWorld`: isolated workspace plus CLI execution
//! - `fixtures`: sample timetable documents
//! - `assertions`: checks on saved documents and directories

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
