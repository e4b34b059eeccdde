//! Entry menu: open an existing timetable or start the wizard.

use std::path::{Path, PathBuf};

use crate::key::Key;
use crate::list::{MenuList, MenuRow, RowAction, Sentinel};
use crate::screen::{GlobalKeys, Response, Signal, StateHandler};
use crate::view::{ListView, ScreenBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherState {
    MainMenu,
    PickingFile,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainCommand {
    OpenExisting,
    CreateNew,
}

pub struct Launcher {
    state: LauncherState,
    main_menu: MenuList<MainCommand>,
    file_menu: MenuList<PathBuf>,
}

impl Launcher {
    /// `files` are the discovered timetables; labels are shown relative
    /// to `data_dir`.
    pub fn new(files: Vec<PathBuf>, data_dir: &Path, list_height: usize) -> Self {
        let main_rows = vec![
            MenuRow::invoke("Open Existing", MainCommand::OpenExisting),
            MenuRow::invoke("Create New", MainCommand::CreateNew),
        ];
        Self {
            state: LauncherState::MainMenu,
            main_menu: MenuList::new("Timetabler", main_rows, Sentinel::Exit, list_height),
            file_menu: MenuList::new(
                "Open Timetable",
                file_rows(files, data_dir),
                Sentinel::Back,
                list_height,
            ),
        }
    }

    fn handle_main_menu(&mut self, key: Key) -> Response {
        match key {
            Key::Up => self.main_menu.move_by(-1),
            Key::Down => self.main_menu.move_by(1),
            Key::Esc => return self.quit(),
            Key::Enter => match self.main_menu.current_action().clone() {
                RowAction::Invoke(MainCommand::OpenExisting) => {
                    self.file_menu.select(0);
                    self.state = LauncherState::PickingFile;
                }
                RowAction::Invoke(MainCommand::CreateNew) => {
                    return Response::Signal(Signal::Create);
                }
                RowAction::Exit | RowAction::Back => return self.quit(),
                RowAction::SetField(_) | RowAction::Label => return Response::Ignored,
            },
            _ => return Response::Ignored,
        }
        Response::Handled
    }

    fn handle_picking_file(&mut self, key: Key) -> Response {
        match key {
            Key::Up => self.file_menu.move_by(-1),
            Key::Down => self.file_menu.move_by(1),
            Key::Esc => self.state = LauncherState::MainMenu,
            Key::Enter => match self.file_menu.current_action().clone() {
                RowAction::Invoke(path) => return Response::Signal(Signal::Open(path)),
                RowAction::Back | RowAction::Exit => self.state = LauncherState::MainMenu,
                // "no files" label
                RowAction::Label => return Response::Beep,
                RowAction::SetField(_) => return Response::Ignored,
            },
            _ => return Response::Ignored,
        }
        Response::Handled
    }

    fn quit(&mut self) -> Response {
        self.state = LauncherState::Exiting;
        Response::Signal(Signal::Quit)
    }
}

fn file_rows(files: Vec<PathBuf>, data_dir: &Path) -> Vec<MenuRow<PathBuf>> {
    if files.is_empty() {
        return vec![MenuRow::label(format!(
            "No timetables found in {}",
            data_dir.display()
        ))];
    }
    files
        .into_iter()
        .map(|path| {
            let label = path
                .strip_prefix(data_dir)
                .unwrap_or(&path)
                .display()
                .to_string();
            MenuRow::invoke(label, path)
        })
        .collect()
}

impl StateHandler for Launcher {
    type State = LauncherState;

    fn state(&self) -> LauncherState {
        self.state
    }

    fn editing(&self) -> bool {
        false
    }

    fn global_keys(&self) -> GlobalKeys {
        GlobalKeys::QUIT
    }

    fn request_exit(&mut self) {
        self.state = LauncherState::Exiting;
    }

    fn handle_key(&mut self, key: Key) -> Response {
        match self.state {
            LauncherState::MainMenu => self.handle_main_menu(key),
            LauncherState::PickingFile => self.handle_picking_file(key),
            LauncherState::Exiting => Response::Ignored,
        }
    }

    fn title(&self) -> String {
        "Timetabler".to_string()
    }

    fn shortcuts(&self) -> &'static str {
        "[up/down] Move  [enter] Select  [esc] Back  [q] Quit"
    }

    fn body(&self) -> ScreenBody {
        match self.state {
            LauncherState::PickingFile => ScreenBody::List(ListView::of(&self.file_menu)),
            _ => ScreenBody::List(ListView::of(&self.main_menu)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::ModalScreen;

    fn list(screen: &ModalScreen<Launcher>) -> ListView {
        match screen.view().body {
            ScreenBody::List(list) => list,
            ScreenBody::Grid(_) => panic!("expected list"),
        }
    }

    #[test]
    fn test_open_existing_file() {
        let data = Path::new("/data");
        let files = vec![data.join("a.json"), data.join("b.json")];
        let mut screen = ModalScreen::new(Launcher::new(files, data, 10));

        screen.handle_key(Key::Enter);
        assert_eq!(screen.handler().state(), LauncherState::PickingFile);
        let labels: Vec<String> = list(&screen).rows.into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["a.json", "b.json", "Back"]);

        screen.handle_key(Key::Down);
        assert_eq!(screen.handle_key(Key::Enter), Signal::Open(data.join("b.json")));
    }

    #[test]
    fn test_no_files_shows_label_and_beeps() {
        let mut screen = ModalScreen::new(Launcher::new(Vec::new(), Path::new("/data"), 10));
        screen.handle_key(Key::Enter);
        assert_eq!(list(&screen).rows[0].label, "No timetables found in /data");

        assert_eq!(screen.handle_key(Key::Enter), Signal::Continue);
        assert!(screen.take_beep());

        screen.handle_key(Key::Esc);
        assert_eq!(screen.handler().state(), LauncherState::MainMenu);
    }

    #[test]
    fn test_create_and_exit() {
        let mut screen = ModalScreen::new(Launcher::new(Vec::new(), Path::new("/data"), 10));
        screen.handle_key(Key::Down);
        assert_eq!(screen.handle_key(Key::Enter), Signal::Create);

        screen.handle_key(Key::Down);
        assert_eq!(screen.handle_key(Key::Enter), Signal::Quit);
        assert_eq!(screen.handler().state(), LauncherState::Exiting);
    }

    #[test]
    fn test_q_quits_from_file_picker() {
        let mut screen = ModalScreen::new(Launcher::new(Vec::new(), Path::new("/data"), 10));
        screen.handle_key(Key::Enter);
        assert_eq!(screen.handle_key(Key::Char('q')), Signal::Quit);
    }
}
