//! Ratatui widgets for the engine's view models.
//!
//! Widgets borrow a view model and only map it onto the buffer. Colour
//! choices for [`StatusLevel`] live here.

mod grid;
mod menu;
mod popup;
mod screen;
mod status_bar;

pub use grid::GridWidget;
pub use menu::MenuWidget;
pub use popup::PopupWidget;
pub use screen::ScreenWidget;
pub use status_bar::StatusBarWidget;

use ratatui::style::Color;
use timetabler_engine::StatusLevel;

/// Convert StatusLevel to Ratatui Color
pub(crate) fn status_level_to_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Success => Color::Green,
        StatusLevel::Info => Color::Cyan,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}
