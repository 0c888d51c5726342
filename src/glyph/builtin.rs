//! The ten predefined glyph sets.

use super::set::{GlyphSet, GlyphSetError};

/// Number of built-in sets.
pub const BUILTIN_COUNT: usize = 10;

/// Built-in sets, selectable by index `0..=9`.
///
/// Slot order follows the turn codes: 1 `Up→Up`, 2 `Up→Right`,
/// 4 `Up→Left`, 5 `Right→Up`, 6 `Right→Right`, 7 `Right→Down`,
/// 10 `Down→Right`, 11 `Down→Down`, 12 `Down→Left`, 13 `Left→Up`,
/// 15 `Left→Down`, 16 `Left→Left`.
pub static BUILTIN: [GlyphSet; BUILTIN_COUNT] = [
    // Heavy box drawing
    GlyphSet::new(['┃', '┏', ' ', '┓', '┛', '━', '┓', ' ', ' ', '┗', '┃', '┛', '┗', ' ', '┏', '━']),
    // Rounded
    GlyphSet::new(['│', '╭', ' ', '╮', '╯', '─', '╮', ' ', ' ', '╰', '│', '╯', '╰', ' ', '╭', '─']),
    // Light box drawing
    GlyphSet::new(['│', '┌', ' ', '┐', '┘', '─', '┐', ' ', ' ', '└', '│', '┘', '└', ' ', '┌', '─']),
    // Double line
    GlyphSet::new(['║', '╔', ' ', '╗', '╝', '═', '╗', ' ', ' ', '╚', '║', '╝', '╚', ' ', '╔', '═']),
    // ASCII plus corners
    GlyphSet::new(['|', '+', ' ', '+', '+', '-', '+', ' ', ' ', '+', '|', '+', '+', ' ', '+', '-']),
    // ASCII slash corners
    GlyphSet::new(['|', '/', ' ', '\\', '\\', '-', '\\', ' ', ' ', '\\', '|', '\\', '/', ' ', '/', '-']),
    // Dotted
    GlyphSet::new(['.', '.', ' ', '.', '.', '.', '.', ' ', ' ', '.', '.', '.', '.', ' ', '.', '.']),
    // Beads
    GlyphSet::new(['.', 'o', ' ', 'o', 'o', '.', 'o', ' ', ' ', 'o', '.', 'o', 'o', ' ', 'o', '.']),
    // ASCII mixed
    GlyphSet::new(['|', '-', ' ', '|', '\\', '-', '\\', ' ', ' ', '\\', '|', '/', '/', ' ', '-', '-']),
    // Heavy/light mixed
    GlyphSet::new(['╿', '┎', ' ', '┒', '┛', '╾', '┒', ' ', ' ', '┖', '╿', '┛', '┖', ' ', '┎', '╾']),
];

/// Look up a built-in set by index.
pub fn builtin(index: usize) -> Result<&'static GlyphSet, GlyphSetError> {
    BUILTIN.get(index).ok_or(GlyphSetError::UnknownBuiltin(index))
}
