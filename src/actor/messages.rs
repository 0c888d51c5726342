//! Message types for actor communication.
//!
//! These define what the input actor hands to the main loop.

/// Key codes for keyboard input.
///
/// Only the keys the menu and hotkeys tell apart; everything else is
/// [`KeyCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, already shifted.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Esc,
    /// Anything else.
    Other,
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key(KeyCode),

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

impl InputEvent {
    /// A plain character key press.
    pub const fn char(c: char) -> Self {
        Self::Key(KeyCode::Char(c))
    }
}
