//! `TerminalSession`: Raw-mode guard for the duration of a run.

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Puts the terminal into raw, no-echo mode on the alternate screen with a
/// hidden cursor.
///
/// The previous mode is restored by [`restore`](Self::restore) or, failing
/// that, on drop.
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    /// Enter raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { active: true })
    }

    /// Leave raw mode and the alternate screen, and show the cursor again.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
