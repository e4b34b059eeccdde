mod listing;
pub mod tui;

pub use listing::{TimetableListView, ValidationView};
