//! Step-by-step creation of a new timetable.

use std::path::PathBuf;

use rand::Rng;
use timetabler_types::{PeriodTime, Subject, SubjectCatalog, SubjectId, Timetable};

use crate::field::{FieldId, apply_key};
use crate::key::Key;
use crate::list::{MenuList, MenuRow, RowAction, Sentinel};
use crate::screen::{GlobalKeys, Response, Signal, StateHandler};
use crate::view::{ListView, Notice, ScreenBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    BasicInfo,
    CreatingPeriodTimes,
    ViewingSubjects,
    EditingSubject,
    Exiting,
}

/// Source of candidate subject ids.
pub trait IdSource {
    fn candidate(&mut self) -> u32;
}

impl<F> IdSource for F
where
    F: FnMut() -> u32,
{
    fn candidate(&mut self) -> u32 {
        self()
    }
}

/// Random numeric ids below one million.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn candidate(&mut self) -> u32 {
        rand::thread_rng().gen_range(0..1_000_000)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BasicCommand {
    ToggleZero,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimesCommand {
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CatalogCommand {
    Edit(SubjectId),
    CreateNew,
    CreateTimetable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubjectCommand {
    Delete,
    Save,
}

/// Subject being edited; not in the catalog until saved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SubjectDraft {
    id: SubjectId,
    name: String,
    teacher: String,
}

pub struct CreationWizard {
    state: WizardState,
    data_dir: PathBuf,

    name: String,
    period_count: String,
    include_zero: bool,
    // values as of the last successful Next out of BasicInfo
    committed_name: String,
    committed_count: String,
    basic_menu: MenuList<BasicCommand>,

    times: Vec<String>,
    times_menu: MenuList<TimesCommand>,
    period_times: Vec<PeriodTime>,

    subjects: SubjectCatalog,
    catalog_menu: MenuList<CatalogCommand>,
    draft: Option<SubjectDraft>,
    subject_menu: MenuList<SubjectCommand>,

    ids: Box<dyn IdSource>,
}

impl CreationWizard {
    pub fn new(data_dir: impl Into<PathBuf>, list_height: usize) -> Self {
        Self::with_ids(data_dir, list_height, Box::new(RandomIds))
    }

    pub fn with_ids(
        data_dir: impl Into<PathBuf>,
        list_height: usize,
        ids: Box<dyn IdSource>,
    ) -> Self {
        let mut wizard = Self {
            state: WizardState::BasicInfo,
            data_dir: data_dir.into(),
            name: String::new(),
            period_count: String::new(),
            include_zero: false,
            committed_name: String::new(),
            committed_count: String::new(),
            basic_menu: MenuList::new(
                "Create Timetable - Basic Information",
                Vec::new(),
                Sentinel::Back,
                list_height,
            ),
            times: Vec::new(),
            times_menu: MenuList::new(
                "Create Timetable - Period Times",
                Vec::new(),
                Sentinel::Back,
                list_height,
            ),
            period_times: Vec::new(),
            subjects: SubjectCatalog::new(),
            catalog_menu: MenuList::new(
                "Create Timetable - Subjects",
                Vec::new(),
                Sentinel::Back,
                list_height,
            ),
            draft: None,
            subject_menu: MenuList::new("Edit Subject", Vec::new(), Sentinel::Back, list_height),
            ids,
        };
        wizard.refresh_basic_menu();
        wizard
    }

    pub fn subjects(&self) -> &SubjectCatalog {
        &self.subjects
    }

    pub fn period_times(&self) -> &[PeriodTime] {
        &self.period_times
    }

    /// Raw start/end buffers, two per slot
    pub fn times(&self) -> &[String] {
        &self.times
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period_count(&self) -> &str {
        &self.period_count
    }

    fn active_menu_field(&self) -> Option<FieldId> {
        match self.state {
            WizardState::BasicInfo => self.basic_menu.current_field(),
            WizardState::CreatingPeriodTimes => self.times_menu.current_field(),
            WizardState::EditingSubject => self.subject_menu.current_field(),
            WizardState::ViewingSubjects | WizardState::Exiting => None,
        }
    }

    fn buffer_mut(&mut self, field: FieldId) -> Option<&mut String> {
        match field {
            FieldId::TimetableName => Some(&mut self.name),
            FieldId::PeriodCount => Some(&mut self.period_count),
            FieldId::SlotStart(i) => self.times.get_mut(2 * i),
            FieldId::SlotEnd(i) => self.times.get_mut(2 * i + 1),
            FieldId::SubjectName => self.draft.as_mut().map(|d| &mut d.name),
            FieldId::Teacher => self.draft.as_mut().map(|d| &mut d.teacher),
            FieldId::Room => None,
        }
    }

    /// Route a key to the focused field editor, if any.
    fn edit_field(&mut self, key: Key) -> Response {
        let Some(field) = self.active_menu_field() else {
            return Response::Ignored;
        };
        let changed = match self.buffer_mut(field) {
            Some(buffer) => apply_key(buffer, key, field.spec()),
            None => false,
        };
        if !changed {
            return Response::Ignored;
        }
        match self.state {
            WizardState::BasicInfo => self.refresh_basic_menu(),
            WizardState::CreatingPeriodTimes => self.refresh_times_menu(),
            WizardState::EditingSubject => self.refresh_subject_menu(),
            WizardState::ViewingSubjects | WizardState::Exiting => {}
        }
        Response::Handled
    }

    fn handle_basic_info(&mut self, key: Key) -> Response {
        match key {
            Key::Up => self.basic_menu.move_by(-1),
            Key::Down => self.basic_menu.move_by(1),
            Key::Esc => return self.close(),
            Key::Enter => match self.basic_menu.current_action().clone() {
                RowAction::Invoke(BasicCommand::ToggleZero) => {
                    self.include_zero = !self.include_zero;
                    self.refresh_basic_menu();
                }
                RowAction::Invoke(BasicCommand::Next) => return self.commit_basic_info(),
                RowAction::Back | RowAction::Exit => return self.close(),
                RowAction::SetField(_) | RowAction::Label => return Response::Ignored,
            },
            _ => return self.edit_field(key),
        }
        Response::Handled
    }

    fn close(&mut self) -> Response {
        self.state = WizardState::Exiting;
        Response::Signal(Signal::Close)
    }

    fn commit_basic_info(&mut self) -> Response {
        if self.name.trim().is_empty() || self.period_count.is_empty() {
            return Response::Popup(Notice::warning(
                "Missing information",
                "Enter a name and a number of periods before continuing",
            ));
        }
        let count: usize = match self.period_count.parse() {
            Ok(count) => count,
            Err(_) => {
                return Response::Popup(Notice::error(
                    "Invalid period count",
                    format!("'{}' is not a number", self.period_count),
                ));
            }
        };

        self.committed_name = self.name.clone();
        self.committed_count = self.period_count.clone();
        self.times = vec![String::new(); 2 * count];
        self.refresh_times_menu();
        self.times_menu.select(0);
        self.times_menu.move_by(1);
        self.state = WizardState::CreatingPeriodTimes;
        Response::Handled
    }

    fn slot_number(&self, index: usize) -> usize {
        if self.include_zero { index } else { index + 1 }
    }

    fn handle_period_times(&mut self, key: Key) -> Response {
        match key {
            Key::Up => self.times_menu.move_by(-1),
            Key::Down => self.times_menu.move_by(1),
            Key::Esc => self.back_to_basic_info(),
            Key::Enter => match self.times_menu.current_action().clone() {
                RowAction::Invoke(TimesCommand::Next) => self.commit_period_times(),
                RowAction::Back | RowAction::Exit => self.back_to_basic_info(),
                RowAction::SetField(_) | RowAction::Label => return Response::Ignored,
            },
            _ => return self.edit_field(key),
        }
        Response::Handled
    }

    fn back_to_basic_info(&mut self) {
        self.name = self.committed_name.clone();
        self.period_count = self.committed_count.clone();
        self.refresh_basic_menu();
        self.state = WizardState::BasicInfo;
    }

    fn commit_period_times(&mut self) {
        self.period_times = self
            .times
            .chunks(2)
            .enumerate()
            .map(|(index, pair)| {
                PeriodTime::new(
                    index.to_string(),
                    format!("Period {}", self.slot_number(index)),
                    pair[0].clone(),
                    pair.get(1).cloned().unwrap_or_default(),
                )
            })
            .collect();
        self.refresh_catalog_menu();
        self.state = WizardState::ViewingSubjects;
    }

    fn handle_viewing_subjects(&mut self, key: Key) -> Response {
        match key {
            Key::Up => self.catalog_menu.move_by(-1),
            Key::Down => self.catalog_menu.move_by(1),
            Key::Esc => self.state = WizardState::CreatingPeriodTimes,
            Key::Enter => match self.catalog_menu.current_action().clone() {
                RowAction::Invoke(CatalogCommand::Edit(id)) => {
                    let Some(subject) = self.subjects.get(&id) else {
                        return Response::Beep;
                    };
                    let draft = SubjectDraft {
                        id: subject.id.clone(),
                        name: subject.name.clone(),
                        teacher: subject.teacher.clone(),
                    };
                    self.open_draft(draft);
                }
                RowAction::Invoke(CatalogCommand::CreateNew) => {
                    let draft = SubjectDraft {
                        id: self.fresh_id(),
                        name: String::new(),
                        teacher: String::new(),
                    };
                    self.open_draft(draft);
                }
                RowAction::Invoke(CatalogCommand::CreateTimetable) => return self.finish(),
                RowAction::Back | RowAction::Exit => self.state = WizardState::CreatingPeriodTimes,
                RowAction::SetField(_) | RowAction::Label => return Response::Ignored,
            },
            _ => return Response::Ignored,
        }
        Response::Handled
    }

    fn fresh_id(&mut self) -> SubjectId {
        loop {
            let id = SubjectId::new(self.ids.candidate().to_string());
            if !self.subjects.contains(&id) {
                return id;
            }
        }
    }

    fn open_draft(&mut self, draft: SubjectDraft) {
        self.draft = Some(draft);
        self.refresh_subject_menu();
        self.subject_menu.select(0);
        self.state = WizardState::EditingSubject;
    }

    fn finish(&mut self) -> Response {
        if self.subjects.is_empty() {
            return Response::Popup(Notice::warning(
                "No subjects",
                "Create at least one subject before creating the timetable",
            ));
        }
        let path = self
            .data_dir
            .join(Timetable::file_name_for(&self.committed_name));
        let timetable = Timetable::new(
            self.committed_name.clone(),
            path,
            self.subjects.clone(),
            self.period_times.clone(),
        );
        tracing::info!(
            name = %timetable.name(),
            subjects = self.subjects.len(),
            slots = self.period_times.len(),
            "timetable created"
        );
        self.state = WizardState::Exiting;
        Response::Signal(Signal::Finished(Box::new(timetable)))
    }

    fn handle_editing_subject(&mut self, key: Key) -> Response {
        match key {
            Key::Up => self.subject_menu.move_by(-1),
            Key::Down => self.subject_menu.move_by(1),
            Key::Esc => self.leave_draft(),
            Key::Enter => match self.subject_menu.current_action().clone() {
                RowAction::Invoke(SubjectCommand::Save) => return self.save_draft(),
                RowAction::Invoke(SubjectCommand::Delete) => {
                    if let Some(draft) = &self.draft {
                        self.subjects.remove(&draft.id);
                    }
                    self.leave_draft();
                }
                RowAction::Back | RowAction::Exit => self.leave_draft(),
                RowAction::SetField(_) | RowAction::Label => return Response::Ignored,
            },
            _ => return self.edit_field(key),
        }
        Response::Handled
    }

    fn save_draft(&mut self) -> Response {
        let Some(draft) = &self.draft else {
            return Response::Beep;
        };
        if draft.name.trim().is_empty() {
            return Response::Popup(Notice::warning("Missing name", "A subject needs a name"));
        }
        let subject = Subject::new(draft.id.clone(), draft.name.clone(), draft.teacher.clone());
        self.subjects.upsert(subject);
        self.leave_draft();
        Response::Handled
    }

    fn leave_draft(&mut self) {
        self.draft = None;
        self.refresh_catalog_menu();
        self.state = WizardState::ViewingSubjects;
    }

    fn refresh_basic_menu(&mut self) {
        let toggle = if self.include_zero { "[x]" } else { "[ ]" };
        self.basic_menu.set_rows(vec![
            MenuRow::field(format!("Name: {}", self.name), FieldId::TimetableName),
            MenuRow::field(
                format!("Number of periods (3-6): {}", self.period_count),
                FieldId::PeriodCount,
            ),
            MenuRow::invoke(format!("Include Period 0: {}", toggle), BasicCommand::ToggleZero),
            MenuRow::invoke("Next", BasicCommand::Next),
        ]);
    }

    fn refresh_times_menu(&mut self) {
        let mut rows = Vec::with_capacity(self.times.len() / 2 * 3 + 1);
        for (index, pair) in self.times.chunks(2).enumerate() {
            rows.push(MenuRow::label(format!("Period {}", self.slot_number(index))));
            rows.push(MenuRow::field(
                format!("  Start time: {}", pair[0]),
                FieldId::SlotStart(index),
            ));
            rows.push(MenuRow::field(
                format!("  End time: {}", pair.get(1).map(String::as_str).unwrap_or("")),
                FieldId::SlotEnd(index),
            ));
        }
        rows.push(MenuRow::invoke("Next", TimesCommand::Next));
        self.times_menu.set_rows(rows);
    }

    fn refresh_catalog_menu(&mut self) {
        let mut rows: Vec<MenuRow<CatalogCommand>> = self
            .subjects
            .iter()
            .map(|subject| {
                MenuRow::invoke(subject.to_string(), CatalogCommand::Edit(subject.id.clone()))
            })
            .collect();
        rows.push(MenuRow::invoke("Create New Subject", CatalogCommand::CreateNew));
        rows.push(MenuRow::invoke("Create Timetable", CatalogCommand::CreateTimetable));
        self.catalog_menu.set_rows(rows);
    }

    fn refresh_subject_menu(&mut self) {
        let (name, teacher) = match &self.draft {
            Some(draft) => (draft.name.as_str(), draft.teacher.as_str()),
            None => ("", ""),
        };
        let rows = vec![
            MenuRow::field(format!("Name: {}", name), FieldId::SubjectName),
            MenuRow::field(format!("Teacher: {}", teacher), FieldId::Teacher),
            MenuRow::invoke("Delete", SubjectCommand::Delete),
            MenuRow::invoke("Save", SubjectCommand::Save),
        ];
        self.subject_menu.set_rows(rows);
    }
}

impl StateHandler for CreationWizard {
    type State = WizardState;

    fn state(&self) -> WizardState {
        self.state
    }

    fn editing(&self) -> bool {
        self.active_menu_field().is_some()
    }

    fn global_keys(&self) -> GlobalKeys {
        GlobalKeys::QUIT
    }

    fn request_exit(&mut self) {
        self.state = WizardState::Exiting;
    }

    fn handle_key(&mut self, key: Key) -> Response {
        match self.state {
            WizardState::BasicInfo => self.handle_basic_info(key),
            WizardState::CreatingPeriodTimes => self.handle_period_times(key),
            WizardState::ViewingSubjects => self.handle_viewing_subjects(key),
            WizardState::EditingSubject => self.handle_editing_subject(key),
            WizardState::Exiting => Response::Ignored,
        }
    }

    fn title(&self) -> String {
        match self.state {
            WizardState::BasicInfo | WizardState::Exiting => "New Timetable".to_string(),
            _ => format!("New Timetable: {}", self.committed_name),
        }
    }

    fn shortcuts(&self) -> &'static str {
        match self.state {
            WizardState::ViewingSubjects => "[up/down] Move  [enter] Select  [esc] Back  [q] Quit",
            _ => "[up/down] Move  [enter] Select  [esc] Back  [q] Quit (not while typing)",
        }
    }

    fn body(&self) -> ScreenBody {
        let view = match self.state {
            WizardState::BasicInfo | WizardState::Exiting => ListView::of(&self.basic_menu),
            WizardState::CreatingPeriodTimes => ListView::of(&self.times_menu),
            WizardState::ViewingSubjects => ListView::of(&self.catalog_menu),
            WizardState::EditingSubject => ListView::of(&self.subject_menu),
        };
        ScreenBody::List(view)
    }
}
