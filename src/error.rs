//! Crate-level error type.
//!
//! The animation core is total and never fails; errors only come from
//! setting up a run (bad configuration) or from the terminal itself.

use crate::config::ConfigError;
use crate::glyph::GlyphSetError;

/// Anything that can stop a run from starting or finishing cleanly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal I/O failed (size query, raw mode, writing output).
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// A custom or built-in glyph set could not be used.
    #[error("invalid glyph set: {0}")]
    GlyphSet(#[from] GlyphSetError),

    /// The configuration was out of range.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
