//! Command line: Flags compatible with the classic `pipes.sh` options.

use crate::config::{
    Config, Toggles, DEFAULT_PALETTE, FPS_MAX, FPS_MIN, PALETTE_SIZE, STRAIGHT_MAX, STRAIGHT_MIN,
};
use crate::glyph::{builtin, GlyphSet, GlyphSetError};
use clap::{ArgAction, Parser};

/// Animated pipes for the terminal.
///
/// With no arguments an interactive menu is shown first. During the run:
/// P/O straighter/curlier, F/D faster/slower, C color, V vivid,
/// K keep on edge, any other key quits.
#[derive(Debug, Clone, Parser)]
#[command(name = "termpipes", version, about, disable_version_flag = true)]
pub struct Args {
    /// Number of pipes.
    #[arg(short = 'p', long = "pipes", value_name = "N", default_value_t = 5)]
    pub pipes: u16,

    /// Glyph set: 0..9, or `c` followed by 16 custom characters, which may
    /// be split over several words. Repeatable.
    #[arg(short = 't', long = "type", value_name = "SET", num_args = 1..)]
    pub glyph_sets: Vec<Vec<String>>,

    /// Palette color 0..7 (taken modulo 8). Repeatable.
    #[arg(short = 'c', long = "color", value_name = "N", allow_negative_numbers = true)]
    pub colors: Vec<i64>,

    /// Frames per second (clamped to 20..100).
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = 75)]
    pub fps: u32,

    /// Straightness (clamped to 5..15); higher means fewer turns.
    #[arg(short = 's', long = "straight", value_name = "N", default_value_t = 15)]
    pub straight: u8,

    /// Glyphs drawn before the screen is cleared; bare `-r` means never.
    #[arg(
        short = 'r',
        long = "limit",
        value_name = "LIMIT",
        num_args = 0..=1,
        default_value_t = 1000,
        default_missing_value = "0"
    )]
    pub limit: u64,

    /// Start pipes at random positions.
    #[arg(short = 'R', long = "random-start")]
    pub random_start: bool,

    /// Use normal instead of bright colors.
    #[arg(short = 'B', long = "no-vivid")]
    pub no_vivid: bool,

    /// Disable color.
    #[arg(short = 'C', long = "no-color")]
    pub no_color: bool,

    /// Let pipes run off the edge instead of turning away.
    #[arg(short = 'K', long = "keep-on-edge")]
    pub keep_on_edge: bool,

    /// Print version.
    #[allow(dead_code)]
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

impl Args {
    /// Build a configuration from the parsed flags.
    ///
    /// Numeric flags are clamped to their ranges; only glyph sets can fail.
    pub fn to_config(&self) -> Result<Config, GlyphSetError> {
        let glyph_sets = if self.glyph_sets.is_empty() {
            Config::default().glyph_sets
        } else {
            self.glyph_sets
                .iter()
                .map(|words| parse_glyph_set_words(words.as_slice()))
                .collect::<Result<Vec<_>, _>>()?
        };

        let palette = if self.colors.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            self.colors
                .iter()
                .filter_map(|&c| u8::try_from(c.rem_euclid(i64::from(PALETTE_SIZE))).ok())
                .collect()
        };

        let mut toggles = Toggles::default();
        toggles.set(Toggles::RANDOM_START, self.random_start);
        toggles.set(Toggles::KEEP_ON_EDGE, self.keep_on_edge);
        toggles.set(Toggles::COLOR, !self.no_color);
        toggles.set(Toggles::VIVID, !self.no_vivid);

        Ok(Config {
            pipes: self.pipes.max(1),
            fps: self.fps.clamp(FPS_MIN, FPS_MAX),
            straight: self.straight.clamp(STRAIGHT_MIN, STRAIGHT_MAX),
            limit: self.limit,
            palette,
            glyph_sets,
            toggles,
        })
    }
}

/// Parse one `-t` value: a built-in index, or `c` plus 16 characters.
pub fn parse_glyph_set(value: &str) -> Result<GlyphSet, GlyphSetError> {
    if let Some(chars) = value.strip_prefix('c') {
        return GlyphSet::custom(chars);
    }
    let index = value
        .trim()
        .parse::<usize>()
        .map_err(|_| GlyphSetError::Unrecognized(value.to_string()))?;
    builtin(index).copied()
}

/// Parse the words following one `-t`.
///
/// A custom set may be split over several words; they are joined before
/// the first 16 characters are taken. A built-in index must be one word.
pub fn parse_glyph_set_words<S: AsRef<str>>(words: &[S]) -> Result<GlyphSet, GlyphSetError> {
    match words {
        [single] => parse_glyph_set(single.as_ref()),
        [first, rest @ ..] if first.as_ref().starts_with('c') => {
            let mut joined = first.as_ref().to_string();
            for word in rest {
                joined.push_str(word.as_ref());
            }
            parse_glyph_set(&joined)
        }
        _ => {
            let words: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
            Err(GlyphSetError::Unrecognized(words.join(" ")))
        }
    }
}
