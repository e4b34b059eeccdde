//! Screen-to-screen flow of the interactive commands.
//!
//! Screens only signal; this driver performs the file I/O they ask for and
//! reports the outcome back as a popup or status message.

use std::io;

use anyhow::Result;
use timetabler_engine::{
    CreationWizard, Frontend, Launcher, ModalScreen, Notice, Signal, TimetableEditor,
    run_until_signal,
};
use timetabler_types::Timetable;

use crate::context::AppContext;

/// Printed after the terminal is restored
pub const FAREWELL: &str = "Goodbye.";

/// Where control goes after a screen ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Return to the calling screen
    Back,
    /// Leave the application
    Quit,
}

/// Launcher menu; opening and creating return here until the user quits.
pub fn run_launcher<F: Frontend>(ctx: &AppContext, frontend: &mut F) -> Result<()> {
    let mut notice: Option<Notice> = None;
    loop {
        let files = ctx.workspace().discover()?;
        let mut screen = ModalScreen::new(Launcher::new(files, ctx.data_dir(), ctx.list_height()));
        if let Some(notice) = notice.take() {
            screen.notify(notice);
        }

        let flow = match run_until_signal(&mut screen, frontend)? {
            Signal::Open(path) => match ctx.workspace().open_timetable(&path) {
                Ok(timetable) => edit(ctx, frontend, timetable)?,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot open timetable");
                    notice = Some(Notice::error("Cannot open timetable", e.to_string()));
                    Flow::Back
                }
            },
            Signal::Create => create(ctx, frontend)?,
            Signal::Quit | Signal::Close => Flow::Quit,
            other => unexpected("launcher", other),
        };

        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

/// Viewer/editor for one timetable. Saves happen here on `s`.
pub fn edit<F: Frontend>(ctx: &AppContext, frontend: &mut F, timetable: Timetable) -> Result<Flow> {
    let mut screen = ModalScreen::new(TimetableEditor::new(timetable, ctx.list_height()));
    loop {
        match run_until_signal(&mut screen, frontend)? {
            Signal::Save => {
                let saved = ctx.workspace().save(screen.handler().timetable());
                match saved {
                    Ok(()) => {
                        let path = screen.handler().timetable().file_path().display().to_string();
                        screen.handler_mut().mark_saved();
                        screen.flash(format!("Saved to {}", path));
                    }
                    Err(e) => screen.notify(Notice::error("Save failed", e.to_string())),
                }
            }
            Signal::Close => return Ok(Flow::Back),
            Signal::Quit => return Ok(Flow::Quit),
            other => {
                unexpected("editor", other);
            }
        }
    }
}

/// Creation wizard, handing the result to the editor unsaved.
pub fn create<F: Frontend>(ctx: &AppContext, frontend: &mut F) -> Result<Flow> {
    let mut screen = ModalScreen::new(CreationWizard::new(ctx.data_dir(), ctx.list_height()));
    loop {
        match run_until_signal(&mut screen, frontend)? {
            Signal::Finished(timetable) => return edit(ctx, frontend, *timetable),
            Signal::Close => return Ok(Flow::Back),
            Signal::Quit => return Ok(Flow::Quit),
            other => {
                unexpected("wizard", other);
            }
        }
    }
}

/// Ctrl-C ends a session the same way `q` does.
pub fn quit_on_interrupt<T>(result: Result<T>) -> Result<()> {
    match result {
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|io| io.kind() == io::ErrorKind::Interrupted) =>
        {
            tracing::info!("interrupted");
            Ok(())
        }
        other => other.map(|_| ()),
    }
}

fn unexpected(screen: &str, signal: Signal) -> Flow {
    tracing::warn!(screen, ?signal, "ignoring unexpected signal");
    Flow::Back
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;
    use timetabler_engine::{Key, ScreenView};
    use timetabler_runtime::{Workspace, WorkspaceOptions};
    use timetabler_types::{Period, PeriodTime, Subject, SubjectCatalog};

    struct Scripted {
        keys: std::vec::IntoIter<Key>,
        frames: Vec<ScreenView>,
    }

    impl Scripted {
        fn new(keys: Vec<Key>) -> Self {
            Self {
                keys: keys.into_iter(),
                frames: Vec::new(),
            }
        }

        fn saw_popup(&self, title: &str) -> bool {
            self.frames
                .iter()
                .any(|f| f.popup.as_ref().is_some_and(|p| p.title == title))
        }

        fn saw_status(&self, prefix: &str) -> bool {
            self.frames
                .iter()
                .any(|f| f.status.as_deref().is_some_and(|s| s.starts_with(prefix)))
        }
    }

    impl Frontend for Scripted {
        fn draw(&mut self, view: &ScreenView) -> io::Result<()> {
            self.frames.push(view.clone());
            Ok(())
        }

        fn next_key(&mut self) -> io::Result<Key> {
            self.keys
                .next()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }

        fn beep(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn context(root: &Path) -> Result<AppContext> {
        let workspace = Workspace::open(WorkspaceOptions {
            root: Some(root.to_string_lossy().into_owned()),
            ..Default::default()
        })?;
        Ok(AppContext::new(workspace))
    }

    fn keys(groups: &[&[Key]]) -> Vec<Key> {
        groups.iter().flat_map(|g| g.iter().copied()).collect()
    }

    #[test]
    fn test_create_edit_save_and_quit() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let ctx = context(temp_dir.path())?;

        let script = keys(&[
            // launcher: Create New
            &[Key::Down, Key::Enter],
            // basic info
            &Key::text("Year 10"),
            &[Key::Down, Key::Char('3'), Key::Down, Key::Down, Key::Enter],
            // first period time
            &Key::text("0900"),
            &[Key::Down],
            &Key::text("0945"),
            &[Key::Down; 20],
            &[Key::Up, Key::Enter],
            // one subject
            &[Key::Enter],
            &Key::text("Maths"),
            &[Key::Down],
            &Key::text("Smith"),
            &[Key::Down, Key::Down, Key::Enter],
            // Create Timetable
            &[Key::Down, Key::Down, Key::Enter],
            // editor: Monday first period, Maths in room 101
            &[Key::Char('e'), Key::Enter, Key::Enter, Key::Enter, Key::Down],
            &Key::text("101"),
            &[Key::Down, Key::Down, Key::Enter],
            &[Key::Char('s'), Key::Char('q')],
        ]);
        let mut frontend = Scripted::new(script);
        run_launcher(&ctx, &mut frontend)?;

        assert!(frontend.saw_status("Saved to"));
        let saved = Timetable::load(ctx.data_dir().join("year_10.json"))?;
        assert_eq!(saved.name(), "Year 10");
        assert_eq!(saved.period_times()[0].start, "0900");
        assert_eq!(saved.period_times()[0].end, "0945");

        let period = saved.period_at(0, "0").unwrap();
        assert_eq!(period.room, "101");
        assert_eq!(saved.subject(&period.subject).unwrap().name, "Maths");
        Ok(())
    }

    #[test]
    fn test_broken_file_reports_popup_and_returns_to_launcher() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let ctx = context(temp_dir.path())?;
        std::fs::create_dir_all(ctx.data_dir())?;
        std::fs::write(ctx.data_dir().join("broken.json"), "{ nope")?;

        // open, pick the file, dismiss the popup, quit
        let mut frontend = Scripted::new(vec![Key::Enter, Key::Enter, Key::Esc, Key::Char('q')]);
        run_launcher(&ctx, &mut frontend)?;

        assert!(frontend.saw_popup("Cannot open timetable"));
        Ok(())
    }

    #[test]
    fn test_failed_save_shows_popup_and_keeps_editing() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let ctx = context(temp_dir.path())?;
        let blocker = temp_dir.path().join("not_a_dir");
        std::fs::write(&blocker, "")?;

        let subjects: SubjectCatalog = vec![Subject::new("m", "Maths", "Smith")].into_iter().collect();
        let mut timetable = Timetable::new(
            "Blocked",
            blocker.join("blocked.json"),
            subjects,
            vec![PeriodTime::new("0", "Period 1", "0900", "0945")],
        );
        timetable.set_period(0, "0", Period::new("m", "1"))?;

        let mut frontend = Scripted::new(vec![Key::Char('s'), Key::Enter, Key::Esc]);
        let flow = edit(&ctx, &mut frontend, timetable)?;

        assert_eq!(flow, Flow::Back);
        assert!(frontend.saw_popup("Save failed"));
        assert!(!frontend.saw_status("Saved to"));
        Ok(())
    }

    #[test]
    fn test_wizard_escape_returns_back() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let ctx = context(temp_dir.path())?;
        let mut frontend = Scripted::new(vec![Key::Esc]);
        assert_eq!(create(&ctx, &mut frontend)?, Flow::Back);
        Ok(())
    }

    #[test]
    fn test_interrupt_counts_as_quit() {
        let interrupted: Result<Flow> =
            Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted").into());
        assert!(quit_on_interrupt(interrupted).is_ok());

        let broken: Result<Flow> = Err(io::Error::other("broken pipe").into());
        assert!(quit_on_interrupt(broken).is_err());
    }
}
