/// Terminal-independent key event consumed by every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    /// Anything the screens have no binding for
    Other,
}

impl Key {
    /// Keys for each character of `text`, for scripted input.
    pub fn text(text: &str) -> Vec<Key> {
        text.chars().map(Key::Char).collect()
    }
}
