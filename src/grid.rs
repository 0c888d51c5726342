//! Grid: The visible character area and positions on it.

use crate::direction::Direction;

/// A cell coordinate.
///
/// Signed, because a pipe running with the keep-on-edge policy may walk
/// off the visible area.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one move in `direction`.
    #[inline]
    #[must_use]
    pub const fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Terminal grid dimensions in character cells.
///
/// Valid positions are `[0, width) × [0, height)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Grid {
    /// Create a new grid.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Check if the grid has no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a position is on the grid.
    #[inline]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// The center cell, `(width / 2, height / 2)`.
    #[inline]
    pub const fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Pull a position back onto the grid.
    ///
    /// An empty grid clamps everything to the origin.
    #[inline]
    pub fn clamp(&self, pos: Position) -> Position {
        let max_x = (i32::from(self.width) - 1).max(0);
        let max_y = (i32::from(self.height) - 1).max(0);
        Position::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
    }

    /// Convert an on-grid position to terminal `(column, row)`.
    #[inline]
    pub fn cell(&self, pos: Position) -> Option<(u16, u16)> {
        if !self.contains(pos) {
            return None;
        }
        Some((u16::try_from(pos.x).ok()?, u16::try_from(pos.y).ok()?))
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Grid({}x{})", self.width, self.height)
    }
}
