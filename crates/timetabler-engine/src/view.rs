//! View models handed to a frontend after every key.
//!
//! Screens never draw; they describe what is on screen and a frontend
//! turns that description into terminal output.

use crate::list::{MenuList, RowSink, RowTag};

/// Everything a frontend needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub title: String,
    pub body: ScreenBody,
    /// One-line key reference shown at the bottom
    pub shortcuts: String,
    /// Transient status message, cleared by the next key
    pub status: Option<String>,
    /// Blocking popup drawn over the body
    pub popup: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenBody {
    Grid(GridView),
    List(ListView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Popup message; any key dismisses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: StatusLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(level: StatusLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, title, message)
    }
}

/// Week grid: one column per day, one row per period time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub days: Vec<String>,
    pub rows: Vec<GridRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRowView {
    pub name: String,
    pub start: String,
    pub end: String,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    Empty,
    /// Empty cell under the cursor
    AddNew,
    Period {
        subject: String,
        teacher: String,
        room: String,
        highlighted: bool,
    },
}

impl CellView {
    pub fn is_highlighted(&self) -> bool {
        match self {
            CellView::Empty => false,
            CellView::AddNew => true,
            CellView::Period { highlighted, .. } => *highlighted,
        }
    }
}

/// Visible window of a [`MenuList`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub title: String,
    pub rows: Vec<ListRowView>,
    pub hidden_above: usize,
    pub hidden_below: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRowView {
    pub index: usize,
    pub label: String,
    pub tag: RowTag,
    pub highlighted: bool,
}

impl ListView {
    pub fn of<C>(menu: &MenuList<C>) -> Self {
        let mut view = ListView {
            title: menu.title().to_string(),
            ..Default::default()
        };
        menu.render(&mut view);
        view
    }

    pub fn highlighted(&self) -> Option<&ListRowView> {
        self.rows.iter().find(|row| row.highlighted)
    }
}

impl RowSink for ListView {
    fn row(&mut self, index: usize, label: &str, tag: RowTag, highlighted: bool) {
        self.rows.push(ListRowView {
            index,
            label: label.to_string(),
            tag,
            highlighted,
        });
    }

    fn more_above(&mut self, hidden: usize) {
        self.hidden_above = hidden;
    }

    fn more_below(&mut self, hidden: usize) {
        self.hidden_below = hidden;
    }
}
