//! Presentation layer.
//!
//! - `views`: plain-text views for the non-interactive commands and
//!   Ratatui widgets for the engine's view models
//! - `renderers`: the terminal frontend that drives the widgets

pub mod renderers;
pub mod views;
