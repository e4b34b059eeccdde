//! Screen state machines for timetabler.
//!
//! Everything here is terminal-free: screens consume [`Key`]s and produce
//! [`ScreenView`]s, and a [`Frontend`] does the actual drawing. That keeps
//! every flow testable with scripted keys.

pub mod editor;
pub mod field;
pub mod key;
pub mod launcher;
pub mod list;
pub mod screen;
pub mod view;
pub mod wizard;

pub use editor::{EditorState, GridCursor, TimetableEditor};
pub use field::{CharFilter, FieldId, FieldSpec, apply_key};
pub use key::Key;
pub use launcher::{Launcher, LauncherState};
pub use list::{MenuList, MenuRow, RowAction, RowSink, RowTag, Sentinel};
pub use screen::{
    Frontend, GlobalKeys, ModalScreen, Response, Signal, StateHandler, run_until_signal,
};
pub use view::{
    CellView, GridRowView, GridView, ListRowView, ListView, Notice, ScreenBody, ScreenView,
    StatusLevel,
};
pub use wizard::{CreationWizard, IdSource, RandomIds, WizardState};
