//! View and edit an open timetable.
//!
//! ```text
//! Viewing --e--> Editing --enter--> EditingPeriod --subject--> SelectingSubject
//!    ^             |  ^                  |  ^                        |
//!    +-----esc-----+  +---esc/back/save--+  +-----esc/back/pick------+
//! ```

use timetabler_types::{DAY_COUNT, DAY_NAMES, Period, SubjectId, Timetable};

use crate::field::{FieldId, apply_key};
use crate::key::Key;
use crate::list::{MenuList, MenuRow, RowAction, Sentinel};
use crate::screen::{GlobalKeys, Response, Signal, StateHandler};
use crate::view::{CellView, GridRowView, GridView, ListView, Notice, ScreenBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Viewing,
    Editing,
    EditingPeriod,
    SelectingSubject,
    Exiting,
}

/// Cell under the cursor; `x` is the day, `y` the period row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCursor {
    pub x: usize,
    pub y: usize,
}

impl GridCursor {
    /// Move by one step, clamped to a `width` x `height` grid.
    pub fn step(&mut self, dx: isize, dy: isize, width: usize, height: usize) {
        self.x = clamp_step(self.x, dx, width);
        self.y = clamp_step(self.y, dy, height);
    }
}

fn clamp_step(value: usize, delta: isize, len: usize) -> usize {
    let max = len.saturating_sub(1) as isize;
    (value as isize + delta).clamp(0, max) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeriodCommand {
    ChooseSubject,
    Delete,
    SaveAndExit,
}

pub struct TimetableEditor {
    timetable: Timetable,
    state: EditorState,
    cursor: GridCursor,
    pending_subject: Option<SubjectId>,
    room: String,
    period_menu: MenuList<PeriodCommand>,
    subject_menu: MenuList<SubjectId>,
    dirty: bool,
}

impl TimetableEditor {
    pub fn new(timetable: Timetable, list_height: usize) -> Self {
        Self {
            timetable,
            state: EditorState::Viewing,
            cursor: GridCursor::default(),
            pending_subject: None,
            room: String::new(),
            period_menu: MenuList::new("Edit Period", Vec::new(), Sentinel::Back, list_height),
            subject_menu: MenuList::new("Select Subject", Vec::new(), Sentinel::Back, list_height),
            dirty: false,
        }
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn into_timetable(self) -> Timetable {
        self.timetable
    }

    pub fn cursor(&self) -> GridCursor {
        self.cursor
    }

    pub fn pending_subject(&self) -> Option<&SubjectId> {
        self.pending_subject.as_ref()
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Unsaved changes since open or the last [`mark_saved`](Self::mark_saved)
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn grid_height(&self) -> usize {
        self.timetable.period_times().len()
    }

    fn current_slot(&self) -> Option<String> {
        self.timetable
            .slot_key_at(self.cursor.y)
            .map(str::to_string)
    }

    fn handle_viewing(&mut self, key: Key) -> Response {
        match key {
            Key::Char('e' | 'E') => {
                self.state = EditorState::Editing;
                Response::Handled
            }
            Key::Esc => {
                self.state = EditorState::Exiting;
                Response::Signal(Signal::Close)
            }
            _ => Response::Ignored,
        }
    }

    fn handle_editing(&mut self, key: Key) -> Response {
        let (dx, dy) = match key {
            Key::Left => (-1, 0),
            Key::Right => (1, 0),
            Key::Up => (0, -1),
            Key::Down => (0, 1),
            Key::Enter => return self.open_period(),
            Key::Esc => {
                self.state = EditorState::Viewing;
                return Response::Handled;
            }
            _ => return Response::Ignored,
        };
        let height = self.grid_height();
        self.cursor.step(dx, dy, DAY_COUNT, height);
        Response::Handled
    }

    /// Load the cell under the cursor into the period form.
    fn open_period(&mut self) -> Response {
        let Some(slot_key) = self.current_slot() else {
            return Response::Beep;
        };
        match self.timetable.period_at(self.cursor.x, &slot_key) {
            Some(period) => {
                self.pending_subject = Some(period.subject.clone());
                self.room = period.room.clone();
            }
            None => {
                self.pending_subject = None;
                self.room.clear();
            }
        }
        self.refresh_period_menu();
        self.period_menu.select(0);
        self.state = EditorState::EditingPeriod;
        Response::Handled
    }

    fn handle_editing_period(&mut self, key: Key) -> Response {
        match key {
            Key::Up => self.period_menu.move_by(-1),
            Key::Down => self.period_menu.move_by(1),
            Key::Esc => self.state = EditorState::Editing,
            Key::Enter => return self.activate_period_row(),
            _ => {
                let Some(field) = self.period_menu.current_field() else {
                    return Response::Ignored;
                };
                if !apply_key(&mut self.room, key, field.spec()) {
                    return Response::Ignored;
                }
                self.refresh_period_menu();
            }
        }
        Response::Handled
    }

    fn activate_period_row(&mut self) -> Response {
        match self.period_menu.current_action().clone() {
            RowAction::Invoke(PeriodCommand::ChooseSubject) => {
                self.refresh_subject_menu();
                let pending = self.pending_subject.clone();
                self.subject_menu.select(0);
                if let Some(id) = pending {
                    self.subject_menu
                        .select_where(|action| action == &RowAction::Invoke(id.clone()));
                }
                self.state = EditorState::SelectingSubject;
                Response::Handled
            }
            RowAction::Invoke(PeriodCommand::Delete) => {
                if let Some(slot_key) = self.current_slot()
                    && self.timetable.clear_period(self.cursor.x, &slot_key).is_some()
                {
                    tracing::debug!(day = self.cursor.x, slot = %slot_key, "period cleared");
                    self.dirty = true;
                }
                self.state = EditorState::Editing;
                Response::Handled
            }
            RowAction::Invoke(PeriodCommand::SaveAndExit) => self.commit_period(),
            RowAction::Back | RowAction::Exit => {
                self.state = EditorState::Editing;
                Response::Handled
            }
            RowAction::SetField(_) | RowAction::Label => Response::Ignored,
        }
    }

    fn commit_period(&mut self) -> Response {
        let Some(subject) = self.pending_subject.clone() else {
            return Response::Popup(Notice::error(
                "No subject",
                "Choose a subject before saving the period",
            ));
        };
        let Some(slot_key) = self.current_slot() else {
            return Response::Beep;
        };
        let period = Period::new(subject, self.room.clone());
        match self.timetable.set_period(self.cursor.x, &slot_key, period) {
            Ok(_) => {
                tracing::debug!(day = self.cursor.x, slot = %slot_key, "period set");
                self.dirty = true;
                self.state = EditorState::Editing;
                Response::Handled
            }
            Err(e) => Response::Popup(Notice::error("Cannot set period", e.to_string())),
        }
    }

    fn handle_selecting_subject(&mut self, key: Key) -> Response {
        match key {
            Key::Up => self.subject_menu.move_by(-1),
            Key::Down => self.subject_menu.move_by(1),
            Key::Esc => self.state = EditorState::EditingPeriod,
            Key::Enter => match self.subject_menu.current_action().clone() {
                RowAction::Invoke(id) => {
                    self.pending_subject = Some(id);
                    self.refresh_period_menu();
                    self.state = EditorState::EditingPeriod;
                }
                RowAction::Back | RowAction::Exit => self.state = EditorState::EditingPeriod,
                RowAction::SetField(_) | RowAction::Label => return Response::Ignored,
            },
            _ => return Response::Ignored,
        }
        Response::Handled
    }

    fn refresh_period_menu(&mut self) {
        let subject_label = self
            .pending_subject
            .as_ref()
            .and_then(|id| self.timetable.subject(id))
            .map(|subject| subject.to_string())
            .unwrap_or_else(|| "<none>".to_string());

        let day = DAY_NAMES.get(self.cursor.x).copied().unwrap_or("?");
        let slot = self
            .timetable
            .period_times()
            .get(self.cursor.y)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        self.period_menu
            .set_title(format!("Edit Period - {}, {}", day, slot));
        self.period_menu.set_rows(vec![
            MenuRow::invoke(format!("Subject: {}", subject_label), PeriodCommand::ChooseSubject),
            MenuRow::field(format!("Room: {}", self.room), FieldId::Room),
            MenuRow::invoke("Delete", PeriodCommand::Delete),
            MenuRow::invoke("Save and Exit", PeriodCommand::SaveAndExit),
        ]);
    }

    fn refresh_subject_menu(&mut self) {
        let rows = self
            .timetable
            .subjects()
            .iter()
            .map(|subject| MenuRow::invoke(subject.to_string(), subject.id.clone()))
            .collect();
        self.subject_menu.set_rows(rows);
    }

    fn grid_view(&self) -> GridView {
        let cursor = (self.state == EditorState::Editing).then_some(self.cursor);
        let rows = self
            .timetable
            .period_times()
            .iter()
            .enumerate()
            .map(|(y, slot)| GridRowView {
                name: slot.name.clone(),
                start: slot.display_start(),
                end: slot.display_end(),
                cells: (0..DAY_COUNT)
                    .map(|x| {
                        let highlighted = cursor == Some(GridCursor { x, y });
                        self.cell_view(x, &slot.slot_key, highlighted)
                    })
                    .collect(),
            })
            .collect();
        GridView {
            days: DAY_NAMES.iter().map(|d| d.to_string()).collect(),
            rows,
        }
    }

    fn cell_view(&self, day: usize, slot_key: &str, highlighted: bool) -> CellView {
        match self.timetable.period_at(day, slot_key) {
            Some(period) => {
                let (subject, teacher) = match self.timetable.subject(&period.subject) {
                    Some(s) => (s.name.clone(), s.teacher.clone()),
                    None => (period.subject.to_string(), String::new()),
                };
                CellView::Period {
                    subject,
                    teacher,
                    room: period.room.clone(),
                    highlighted,
                }
            }
            None if highlighted => CellView::AddNew,
            None => CellView::Empty,
        }
    }
}

impl StateHandler for TimetableEditor {
    type State = EditorState;

    fn state(&self) -> EditorState {
        self.state
    }

    fn editing(&self) -> bool {
        self.state == EditorState::EditingPeriod && self.period_menu.current_field().is_some()
    }

    fn global_keys(&self) -> GlobalKeys {
        GlobalKeys::QUIT_AND_SAVE
    }

    fn request_exit(&mut self) {
        self.state = EditorState::Exiting;
    }

    fn handle_key(&mut self, key: Key) -> Response {
        match self.state {
            EditorState::Viewing => self.handle_viewing(key),
            EditorState::Editing => self.handle_editing(key),
            EditorState::EditingPeriod => self.handle_editing_period(key),
            EditorState::SelectingSubject => self.handle_selecting_subject(key),
            EditorState::Exiting => Response::Ignored,
        }
    }

    fn title(&self) -> String {
        let marker = if self.dirty { " *" } else { "" };
        match self.state {
            EditorState::Editing => format!("Editing: {}{}", self.timetable.name(), marker),
            _ => format!("{}{}", self.timetable.name(), marker),
        }
    }

    fn shortcuts(&self) -> &'static str {
        match self.state {
            EditorState::Viewing => "[e] Edit  [s] Save  [esc] Back  [q] Quit",
            EditorState::Editing => {
                "[arrows] Move  [enter] Edit cell  [s] Save  [esc] Stop editing  [q] Quit"
            }
            EditorState::EditingPeriod => "[up/down] Move  [enter] Select  [esc] Cancel",
            EditorState::SelectingSubject => "[up/down] Move  [enter] Choose  [esc] Back",
            EditorState::Exiting => "",
        }
    }

    fn body(&self) -> ScreenBody {
        match self.state {
            EditorState::EditingPeriod => ScreenBody::List(ListView::of(&self.period_menu)),
            EditorState::SelectingSubject => ScreenBody::List(ListView::of(&self.subject_menu)),
            _ => ScreenBody::Grid(self.grid_view()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::ModalScreen;
    use timetabler_types::{PeriodTime, Subject, SubjectCatalog};

    fn sample() -> Timetable {
        let subjects: SubjectCatalog = vec![
            Subject::new("m", "Maths", "Smith"),
            Subject::new("e", "English", "Jones"),
        ]
        .into_iter()
        .collect();
        let period_times = vec![
            PeriodTime::new("0", "Period 1", "0900", "0945"),
            PeriodTime::new("1", "Period 2", "0945", "1030"),
            PeriodTime::new("2", "Period 3", "1045", "1130"),
        ];
        Timetable::new("Year 10", "year_10.json", subjects, period_times)
    }

    fn press(screen: &mut ModalScreen<TimetableEditor>, keys: &[Key]) -> Signal {
        let mut last = Signal::Continue;
        for key in keys {
            last = screen.handle_key(*key);
        }
        last
    }

    fn grid(screen: &ModalScreen<TimetableEditor>) -> GridView {
        match screen.view().body {
            ScreenBody::Grid(grid) => grid,
            ScreenBody::List(_) => panic!("expected grid"),
        }
    }

    #[test]
    fn test_cursor_clamps_to_grid() {
        let mut screen = ModalScreen::new(TimetableEditor::new(sample(), 10));
        press(&mut screen, &[Key::Char('e'), Key::Left, Key::Up]);
        assert_eq!(screen.handler().cursor(), GridCursor { x: 0, y: 0 });

        press(&mut screen, &[Key::Right; 9]);
        press(&mut screen, &[Key::Down; 9]);
        assert_eq!(screen.handler().cursor(), GridCursor { x: 4, y: 2 });
    }

    #[test]
    fn test_schedule_period_end_to_end() {
        let mut screen = ModalScreen::new(TimetableEditor::new(sample(), 10));
        press(&mut screen, &[Key::Char('e'), Key::Right, Key::Right, Key::Down, Key::Enter]);
        assert_eq!(screen.handler().state(), EditorState::EditingPeriod);

        // Subject row -> pick English, then Maths
        press(&mut screen, &[Key::Enter]);
        assert_eq!(screen.handler().state(), EditorState::SelectingSubject);
        press(&mut screen, &[Key::Down, Key::Enter]);
        assert_eq!(screen.handler().pending_subject(), Some(&SubjectId::from("e")));
        press(&mut screen, &[Key::Enter, Key::Up, Key::Enter]);
        assert_eq!(screen.handler().pending_subject(), Some(&SubjectId::from("m")));

        // Room row; 's' and 'q' are text here
        press(&mut screen, &[Key::Down]);
        press(&mut screen, &Key::text("204"));
        assert_eq!(screen.handler().room(), "204");

        press(&mut screen, &[Key::Down, Key::Down, Key::Enter]);
        assert_eq!(screen.handler().state(), EditorState::Editing);
        assert!(screen.handler().is_dirty());
        assert_eq!(
            screen.handler().timetable().period_at(2, "1"),
            Some(&Period::new("m", "204"))
        );

        let cell = &grid(&screen).rows[1].cells[2];
        assert_eq!(
            cell,
            &CellView::Period {
                subject: "Maths".to_string(),
                teacher: "Smith".to_string(),
                room: "204".to_string(),
                highlighted: true,
            }
        );
    }

    #[test]
    fn test_leaving_subject_picker_keeps_pending_subject() -> timetabler_types::Result<()> {
        let mut timetable = sample();
        timetable.set_period(0, "0", Period::new("e", "101"))?;
        let mut screen = ModalScreen::new(TimetableEditor::new(timetable, 10));
        press(&mut screen, &[Key::Char('e'), Key::Enter]);
        assert_eq!(screen.handler().pending_subject(), Some(&SubjectId::from("e")));

        // esc after moving the selection
        press(&mut screen, &[Key::Enter]);
        assert_eq!(screen.handler().state(), EditorState::SelectingSubject);
        press(&mut screen, &[Key::Up, Key::Esc]);
        assert_eq!(screen.handler().state(), EditorState::EditingPeriod);
        assert_eq!(screen.handler().pending_subject(), Some(&SubjectId::from("e")));

        // the Back row
        press(&mut screen, &[Key::Up; 5]);
        press(&mut screen, &[Key::Enter]);
        assert_eq!(screen.handler().state(), EditorState::SelectingSubject);
        press(&mut screen, &[Key::Down; 10]);
        press(&mut screen, &[Key::Enter]);
        assert_eq!(screen.handler().state(), EditorState::EditingPeriod);
        assert_eq!(screen.handler().pending_subject(), Some(&SubjectId::from("e")));
        assert!(screen.handler().timetable().period_at(0, "0").is_some());
        assert!(!screen.handler().is_dirty());
        Ok(())
    }

    #[test]
    fn test_delete_period_shows_add_new() -> timetabler_types::Result<()> {
        let mut timetable = sample();
        timetable.set_period(0, "0", Period::new("e", "101"))?;
        let mut screen = ModalScreen::new(TimetableEditor::new(timetable, 10));

        press(&mut screen, &[Key::Char('e'), Key::Enter]);
        assert_eq!(screen.handler().room(), "101");
        press(&mut screen, &[Key::Down, Key::Down, Key::Enter]);

        assert_eq!(screen.handler().state(), EditorState::Editing);
        assert!(screen.handler().timetable().period_at(0, "0").is_none());
        assert_eq!(grid(&screen).rows[0].cells[0], CellView::AddNew);
        Ok(())
    }

    #[test]
    fn test_save_without_subject_raises_popup() {
        let mut screen = ModalScreen::new(TimetableEditor::new(sample(), 10));
        press(&mut screen, &[Key::Char('e'), Key::Enter]);
        press(&mut screen, &[Key::Down, Key::Down, Key::Down, Key::Enter]);

        assert!(screen.popup().is_some());
        assert_eq!(screen.handler().state(), EditorState::EditingPeriod);
        assert_eq!(screen.handler().timetable().period_count(), 0);
        assert!(!screen.handler().is_dirty());
    }

    #[test]
    fn test_cancel_discards_form() {
        let mut screen = ModalScreen::new(TimetableEditor::new(sample(), 10));
        press(&mut screen, &[Key::Char('e'), Key::Enter, Key::Down]);
        press(&mut screen, &Key::text("9"));
        press(&mut screen, &[Key::Esc]);
        assert_eq!(screen.handler().state(), EditorState::Editing);
        assert_eq!(screen.handler().timetable().period_count(), 0);
    }

    #[test]
    fn test_global_keys_by_state() {
        let mut screen = ModalScreen::new(TimetableEditor::new(sample(), 10));
        assert_eq!(screen.handle_key(Key::Char('s')), Signal::Save);

        // room editor focused: q is text
        press(&mut screen, &[Key::Char('e'), Key::Enter, Key::Down]);
        assert_eq!(screen.handle_key(Key::Char('q')), Signal::Continue);
        assert_eq!(screen.handler().room(), "q");

        // subject row is not an editor
        press(&mut screen, &[Key::Up]);
        assert_eq!(screen.handle_key(Key::Char('q')), Signal::Quit);
        assert_eq!(screen.handler().state(), EditorState::Exiting);
    }

    #[test]
    fn test_escape_from_viewing_closes() {
        let mut screen = ModalScreen::new(TimetableEditor::new(sample(), 10));
        press(&mut screen, &[Key::Char('e'), Key::Esc]);
        assert_eq!(screen.handler().state(), EditorState::Viewing);
        assert_eq!(screen.handle_key(Key::Esc), Signal::Close);
        assert_eq!(screen.handler().state(), EditorState::Exiting);
    }

    #[test]
    fn test_viewing_grid_has_no_highlight() {
        let screen = ModalScreen::new(TimetableEditor::new(sample(), 10));
        let grid = grid(&screen);
        assert_eq!(grid.days.len(), DAY_COUNT);
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.rows[0].start, "09:00");
        assert!(
            grid.rows
                .iter()
                .flat_map(|row| row.cells.iter())
                .all(|cell| !cell.is_highlighted())
        );
    }

    #[test]
    fn test_empty_period_times_beeps_on_enter() {
        let timetable = Timetable::new("Empty", "empty.json", SubjectCatalog::new(), Vec::new());
        let mut screen = ModalScreen::new(TimetableEditor::new(timetable, 10));
        press(&mut screen, &[Key::Char('e'), Key::Down, Key::Enter]);
        assert_eq!(screen.handler().state(), EditorState::Editing);
        assert!(screen.take_beep());
    }
}
