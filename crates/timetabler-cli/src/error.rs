use std::fmt;

/// Minimum terminal size the viewer lays out in
pub const MIN_WIDTH: u16 = 90;
pub const MIN_HEIGHT: u16 = 30;

/// Environment problems that stop the TUI from starting
#[derive(Debug)]
pub enum CliError {
    TerminalTooSmall { width: u16, height: u16 },
    NotATerminal,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::TerminalTooSmall { width, height } => write!(
                f,
                "Terminal is {}x{}; at least {}x{} is needed",
                width, height, MIN_WIDTH, MIN_HEIGHT
            ),
            CliError::NotATerminal => write!(f, "Standard output is not a terminal"),
        }
    }
}

impl std::error::Error for CliError {}

/// Process exit code for an error returned by [`crate::run`]:
/// 2 for invalid timetable data or a missing file, 3 when the terminal is
/// unusable, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<timetabler_runtime::Error>()
            && e.is_invalid_input()
        {
            return 2;
        }
        if let Some(timetabler_types::Error::InvalidData(_)) =
            cause.downcast_ref::<timetabler_types::Error>()
        {
            return 2;
        }
        if cause.downcast_ref::<CliError>().is_some() {
            return 3;
        }
    }
    1
}
