//! GlyphSet: A fixed table of 16 single-cell glyphs.

use crate::direction::TurnCode;
use unicode_width::UnicodeWidthChar;

/// Number of glyph slots, one per turn code.
pub const GLYPH_SLOTS: usize = 16;

/// Zero-based slots that no (entry, exit) pair maps to.
///
/// These are forced blank in every set, including custom ones.
pub const UNUSED_SLOTS: [usize; 4] = [2, 7, 8, 13];

/// Why a custom glyph set was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlyphSetError {
    /// Fewer than 16 characters were supplied.
    #[error("custom glyph set needs 16 characters, got {found}")]
    TooShort {
        /// Characters actually supplied.
        found: usize,
    },

    /// A used slot holds a character that is not exactly one cell wide.
    #[error("glyph {glyph:?} in slot {slot} is not one cell wide")]
    WideGlyph {
        /// The offending character.
        glyph: char,
        /// One-based slot (turn code) it was supplied for.
        slot: usize,
    },

    /// A built-in set index outside `0..=9`.
    #[error("unknown built-in glyph set {0} (expected 0..=9)")]
    UnknownBuiltin(usize),

    /// Neither a built-in index nor a `c`-prefixed custom set.
    #[error("expected a set index 0..=9 or `c` plus 16 characters, got {0:?}")]
    Unrecognized(String),
}

/// An immutable set of 16 glyphs indexed by turn code.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphSet {
    glyphs: [char; GLYPH_SLOTS],
}

impl GlyphSet {
    /// Build a set from a full slot table, blanking the unused slots.
    pub const fn new(mut glyphs: [char; GLYPH_SLOTS]) -> Self {
        let mut i = 0;
        while i < UNUSED_SLOTS.len() {
            glyphs[UNUSED_SLOTS[i]] = ' ';
            i += 1;
        }
        Self { glyphs }
    }

    /// Parse a custom set from the first 16 characters of `chars`.
    ///
    /// Characters past the 16th are ignored. The four unused slots are
    /// blanked whatever was supplied for them.
    pub fn custom(chars: &str) -> Result<Self, GlyphSetError> {
        let mut glyphs = [' '; GLYPH_SLOTS];
        let mut found = 0;
        for (slot, glyph) in glyphs.iter_mut().zip(chars.chars()) {
            *slot = glyph;
            found += 1;
        }
        if found < GLYPH_SLOTS {
            return Err(GlyphSetError::TooShort { found });
        }

        let set = Self::new(glyphs);
        for (i, &glyph) in set.glyphs.iter().enumerate() {
            if UNUSED_SLOTS.contains(&i) {
                continue;
            }
            if glyph.width() != Some(1) {
                return Err(GlyphSetError::WideGlyph { glyph, slot: i + 1 });
            }
        }
        Ok(set)
    }

    /// Glyph for a turn code.
    #[inline]
    pub const fn glyph(&self, code: TurnCode) -> char {
        self.glyphs[code.slot()]
    }

    /// All 16 slots in turn-code order.
    #[inline]
    pub const fn glyphs(&self) -> &[char; GLYPH_SLOTS] {
        &self.glyphs
    }
}

impl std::fmt::Debug for GlyphSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text: String = self.glyphs.iter().collect();
        write!(f, "GlyphSet({text:?})")
    }
}
