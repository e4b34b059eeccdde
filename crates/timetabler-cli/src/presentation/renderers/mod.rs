mod tui;

pub use tui::TuiFrontend;
