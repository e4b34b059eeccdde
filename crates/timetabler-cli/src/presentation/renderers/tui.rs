//! Crossterm/Ratatui implementation of the engine's [`Frontend`].
//!
//! The frontend owns the terminal for as long as it lives: raw mode and the
//! alternate screen are entered in [`TuiFrontend::new`] and restored on drop.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use is_terminal::IsTerminal;
use ratatui::{Terminal, backend::CrosstermBackend};
use timetabler_engine::{Frontend, Key, ScreenView};

use crate::error::{CliError, MIN_HEIGHT, MIN_WIDTH};
use crate::presentation::views::tui::ScreenWidget;

pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    /// Kept so a resize can redraw without asking the engine
    last_view: Option<ScreenView>,
}

impl TuiFrontend {
    pub fn new() -> Result<Self> {
        if !io::stdout().is_terminal() {
            return Err(CliError::NotATerminal.into());
        }
        let Some((terminal_size::Width(width), terminal_size::Height(height))) =
            terminal_size::terminal_size()
        else {
            return Err(CliError::NotATerminal.into());
        };
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(CliError::TerminalTooSmall { width, height }.into());
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // a second frontend in the same process keeps the first handler
        if let Err(e) = ctrlc::set_handler(move || {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            std::process::exit(130);
        }) {
            tracing::debug!(error = %e, "ctrl-c handler not installed");
        }

        tracing::debug!(width, height, "terminal ready");
        Ok(Self {
            terminal,
            last_view: None,
        })
    }

    fn render(&mut self) -> io::Result<()> {
        if let Some(view) = &self.last_view {
            self.terminal
                .draw(|f| f.render_widget(ScreenWidget::new(view), f.area()))?;
        }
        Ok(())
    }
}

impl Frontend for TuiFrontend {
    fn draw(&mut self, view: &ScreenView) -> io::Result<()> {
        self.last_view = Some(view.clone());
        self.render()
    }

    fn next_key(&mut self) -> io::Result<Key> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_interrupt(&key) {
                        return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
                    }
                    return Ok(map_key(key.code));
                }
                Event::Resize(width, height) => {
                    tracing::trace!(width, height, "resize");
                    self.terminal.autoresize()?;
                    self.render()?;
                }
                _ => {}
            }
        }
    }

    fn beep(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => Key::Other,
    }
}
