//! Modal screen engine shared by every state machine.
//!
//! A [`ModalScreen`] wraps one [`StateHandler`] and owns the concerns every
//! screen has in common: the blocking popup, the transient status line and
//! the global `q`/`s` keys.

use std::fmt;
use std::io;
use std::path::PathBuf;

use timetabler_types::Timetable;

use crate::key::Key;
use crate::view::{Notice, ScreenBody, ScreenView};

/// What a screen asks its driver to do after a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Keep reading keys
    Continue,
    /// Persist the timetable being edited
    Save,
    /// The screen is done; return to whoever opened it
    Close,
    /// Leave the application
    Quit,
    /// The creation wizard produced a timetable
    Finished(Box<Timetable>),
    /// The launcher picked a file
    Open(PathBuf),
    /// The launcher asked for the creation wizard
    Create,
}

/// A handler's answer to a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Consumed; state may have changed
    Handled,
    /// No binding in the current state
    Ignored,
    /// Alert the user without a message
    Beep,
    /// Show a blocking popup
    Popup(Notice),
    /// Hand control back to the driver
    Signal(Signal),
}

/// Global keys a screen honours while no field editor has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalKeys {
    pub quit: bool,
    pub save: bool,
}

impl GlobalKeys {
    pub const QUIT: GlobalKeys = GlobalKeys {
        quit: true,
        save: false,
    };
    pub const QUIT_AND_SAVE: GlobalKeys = GlobalKeys {
        quit: true,
        save: true,
    };
}

/// One screen's state machine.
pub trait StateHandler {
    type State: Copy + Eq + fmt::Debug;

    fn state(&self) -> Self::State;

    /// True while the selected row is a field editor, so printable keys
    /// belong to the field and not to the global bindings.
    fn editing(&self) -> bool;

    fn global_keys(&self) -> GlobalKeys;

    /// Move to the terminal state after a global quit.
    fn request_exit(&mut self);

    fn handle_key(&mut self, key: Key) -> Response;

    fn title(&self) -> String;

    fn shortcuts(&self) -> &'static str;

    fn body(&self) -> ScreenBody;
}

/// Terminal abstraction the engine draws through.
pub trait Frontend {
    fn draw(&mut self, view: &ScreenView) -> io::Result<()>;

    /// Block until the next key press.
    fn next_key(&mut self) -> io::Result<Key>;

    fn beep(&mut self) -> io::Result<()>;
}

pub struct ModalScreen<H> {
    handler: H,
    popup: Option<Notice>,
    status: Option<String>,
    pending_beep: bool,
}

impl<H: StateHandler> ModalScreen<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            popup: None,
            status: None,
            pending_beep: false,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    pub fn popup(&self) -> Option<&Notice> {
        self.popup.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Show a blocking popup from outside the handler, e.g. a failed save.
    pub fn notify(&mut self, notice: Notice) {
        self.popup = Some(notice);
        self.pending_beep = true;
    }

    /// Show a message on the status line until the next key.
    pub fn flash(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Whether the frontend should alert; resets the flag.
    pub fn take_beep(&mut self) -> bool {
        std::mem::take(&mut self.pending_beep)
    }

    pub fn handle_key(&mut self, key: Key) -> Signal {
        // an open popup swallows exactly one key
        if self.popup.take().is_some() {
            return Signal::Continue;
        }
        self.status = None;

        if !self.handler.editing() {
            let globals = self.handler.global_keys();
            match key {
                Key::Char('q' | 'Q') if globals.quit => {
                    tracing::debug!(state = ?self.handler.state(), "quit requested");
                    self.handler.request_exit();
                    return Signal::Quit;
                }
                Key::Char('s' | 'S') if globals.save => return Signal::Save,
                _ => {}
            }
        }

        let before = self.handler.state();
        let response = self.handler.handle_key(key);
        let after = self.handler.state();
        if before != after {
            tracing::trace!(from = ?before, to = ?after, "state transition");
        }

        match response {
            Response::Handled | Response::Ignored => Signal::Continue,
            Response::Beep => {
                self.pending_beep = true;
                Signal::Continue
            }
            Response::Popup(notice) => {
                self.notify(notice);
                Signal::Continue
            }
            Response::Signal(signal) => signal,
        }
    }

    pub fn view(&self) -> ScreenView {
        ScreenView {
            title: self.handler.title(),
            body: self.handler.body(),
            shortcuts: self.handler.shortcuts().to_string(),
            status: self.status.clone(),
            popup: self.popup.clone(),
        }
    }
}

/// Draw, read a key and dispatch it until the screen signals something
/// other than [`Signal::Continue`].
pub fn run_until_signal<H, F>(screen: &mut ModalScreen<H>, frontend: &mut F) -> io::Result<Signal>
where
    H: StateHandler,
    F: Frontend + ?Sized,
{
    loop {
        frontend.draw(&screen.view())?;
        if screen.take_beep() {
            frontend.beep()?;
        }
        let key = frontend.next_key()?;
        match screen.handle_key(key) {
            Signal::Continue => {}
            signal => return Ok(signal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldId, apply_key};
    use crate::list::{MenuList, MenuRow, Sentinel};
    use crate::view::ListView;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Probe {
        Open,
        Done,
    }

    /// One text field and one command that raises a popup.
    struct ProbeHandler {
        state: Probe,
        menu: MenuList<()>,
        text: String,
    }

    impl ProbeHandler {
        fn new() -> Self {
            let rows = vec![MenuRow::field("Text", FieldId::Teacher), MenuRow::invoke("Warn", ())];
            Self {
                state: Probe::Open,
                menu: MenuList::new("Probe", rows, Sentinel::Back, 5),
                text: String::new(),
            }
        }
    }

    impl StateHandler for ProbeHandler {
        type State = Probe;

        fn state(&self) -> Probe {
            self.state
        }

        fn editing(&self) -> bool {
            self.menu.current_field().is_some()
        }

        fn global_keys(&self) -> GlobalKeys {
            GlobalKeys::QUIT_AND_SAVE
        }

        fn request_exit(&mut self) {
            self.state = Probe::Done;
        }

        fn handle_key(&mut self, key: Key) -> Response {
            match key {
                Key::Down => {
                    self.menu.move_by(1);
                    Response::Handled
                }
                Key::Enter => Response::Popup(Notice::warning("Warn", "careful")),
                Key::Esc => Response::Beep,
                _ => match self.menu.current_field() {
                    Some(field) if apply_key(&mut self.text, key, field.spec()) => Response::Handled,
                    _ => Response::Ignored,
                },
            }
        }

        fn title(&self) -> String {
            "Probe".to_string()
        }

        fn shortcuts(&self) -> &'static str {
            "[q] Quit"
        }

        fn body(&self) -> ScreenBody {
            ScreenBody::List(ListView::of(&self.menu))
        }
    }

    struct Scripted {
        keys: std::vec::IntoIter<Key>,
        frames: Vec<ScreenView>,
        beeps: usize,
    }

    impl Scripted {
        fn new(keys: Vec<Key>) -> Self {
            Self {
                keys: keys.into_iter(),
                frames: Vec::new(),
                beeps: 0,
            }
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
            self.beeps += 1;
            Ok(())
        }
    }

    #[test]
    fn test_global_keys_are_suppressed_while_editing() {
        let mut screen = ModalScreen::new(ProbeHandler::new());
        assert_eq!(screen.handle_key(Key::Char('q')), Signal::Continue);
        assert_eq!(screen.handle_key(Key::Char('s')), Signal::Continue);
        assert_eq!(screen.handler().text, "qs");
        assert_eq!(screen.handler().state(), Probe::Open);
    }

    #[test]
    fn test_global_keys_fire_outside_editors() {
        let mut screen = ModalScreen::new(ProbeHandler::new());
        screen.handle_key(Key::Down);
        assert_eq!(screen.handle_key(Key::Char('s')), Signal::Save);
        assert_eq!(screen.handle_key(Key::Char('Q')), Signal::Quit);
        assert_eq!(screen.handler().state(), Probe::Done);
    }

    #[test]
    fn test_popup_swallows_next_key() {
        let mut screen = ModalScreen::new(ProbeHandler::new());
        screen.handle_key(Key::Down);
        screen.handle_key(Key::Enter);
        assert_eq!(screen.popup().map(|n| n.title.as_str()), Some("Warn"));
        assert!(screen.take_beep());

        // would quit without the popup
        assert_eq!(screen.handle_key(Key::Char('q')), Signal::Continue);
        assert!(screen.popup().is_none());
        assert_eq!(screen.handle_key(Key::Char('q')), Signal::Quit);
    }

    #[test]
    fn test_status_is_cleared_by_next_key() {
        let mut screen = ModalScreen::new(ProbeHandler::new());
        screen.flash("Saved");
        assert_eq!(screen.view().status.as_deref(), Some("Saved"));
        screen.handle_key(Key::Down);
        assert_eq!(screen.status(), None);
    }

    #[test]
    fn test_run_until_signal_draws_and_beeps() -> io::Result<()> {
        let mut screen = ModalScreen::new(ProbeHandler::new());
        let mut frontend = Scripted::new(vec![
            Key::Char('a'),
            Key::Down,
            Key::Esc,
            Key::Char('q'),
        ]);

        let signal = run_until_signal(&mut screen, &mut frontend)?;
        assert_eq!(signal, Signal::Quit);
        assert_eq!(frontend.frames.len(), 4);
        assert_eq!(frontend.beeps, 1);
        assert_eq!(screen.handler().text, "a");
        Ok(())
    }

    #[test]
    fn test_run_until_signal_propagates_frontend_errors() {
        let mut screen = ModalScreen::new(ProbeHandler::new());
        let mut frontend = Scripted::new(Vec::new());
        let err = run_until_signal(&mut screen, &mut frontend).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
