//! Direction: The four-way compass used by every pipe.
//!
//! A pipe always enters a cell travelling in one direction and leaves it
//! travelling in another. The pair is folded into a [`TurnCode`], which
//! indexes the 16 slots of a glyph set.
//!
//! ```text
//!            Up
//!             ▲
//!   Left ◀────┼────▶ Right
//!             ▼
//!           Down
//! ```

/// A compass direction on the character grid.
///
/// The discriminants are cyclic: turning right adds one, turning left
/// subtracts one, both modulo 4.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up = 0,
    /// Towards the last column.
    Right = 1,
    /// Towards the last row.
    Down = 2,
    /// Towards column 0.
    Left = 3,
}

impl Direction {
    /// All directions in cyclic order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Direction for a cyclic index (taken modulo 4).
    #[inline]
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// Cyclic index of this direction.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rotate 90° counter-clockwise.
    #[inline]
    #[must_use]
    pub const fn turn_left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotate 90° clockwise.
    #[inline]
    #[must_use]
    pub const fn turn_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Cell offset `(dx, dy)` of one move in this direction.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// Shape index in `1..=16` for an (entry, exit) direction pair.
///
/// Codes 3, 8, 9 and 14 are never produced; glyph sets keep those slots
/// blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnCode(u8);

impl TurnCode {
    /// Smallest valid code.
    pub const MIN: u8 = 1;
    /// Largest valid code.
    pub const MAX: u8 = 16;

    /// The raw code in `1..=16`.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based glyph slot for this code.
    #[inline]
    pub const fn slot(self) -> usize {
        (self.0 - 1) as usize
    }
}

/// Row-major `[entry][exit]` lookup. The four 180° reversals fall back to
/// the straight code of the entry axis.
const TURN_CODES: [u8; 16] = [
    // exit: Up Right Down Left
    1, 2, 1, 4, // entry Up
    5, 6, 7, 6, // entry Right
    11, 10, 11, 12, // entry Down
    13, 16, 15, 16, // entry Left
];

/// Derive the glyph shape for a pipe entering along `entry` and leaving
/// along `exit`.
#[inline]
pub const fn turn_code(entry: Direction, exit: Direction) -> TurnCode {
    TurnCode(TURN_CODES[(entry.index() as usize) * 4 + exit.index() as usize])
}
