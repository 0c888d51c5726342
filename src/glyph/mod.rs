//! Glyph module: Line-drawing characters keyed by turn code.
//!
//! This module contains:
//! - [`GlyphSet`]: 16 glyphs indexed by [`TurnCode`](crate::direction::TurnCode)
//! - [`BUILTIN`]: the ten predefined sets
//! - [`GlyphSetError`]: why a custom set was rejected

mod builtin;
mod set;

pub use builtin::{builtin, BUILTIN, BUILTIN_COUNT};
pub use set::{GlyphSet, GlyphSetError, GLYPH_SLOTS, UNUSED_SLOTS};
