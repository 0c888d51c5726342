//! Configuration: Startup parameters and live-adjustable settings.
//!
//! [`Config`] is produced once (by the command line or the pre-run menu),
//! validated, and handed to the scheduler. The scheduler copies the
//! hotkey-adjustable part into [`Settings`] and owns it from then on.

use crate::glyph::{GlyphSet, BUILTIN};
use bitflags::bitflags;
use std::time::Duration;

/// Lowest user-selectable straightness.
pub const STRAIGHT_MIN: u8 = 5;
/// Highest user-selectable straightness.
pub const STRAIGHT_MAX: u8 = 15;
/// Span of the turn draw. A turn happens when `uniform(0..SPAN) >= straight`,
/// so a straightness of `SPAN` never turns.
pub const STRAIGHT_SPAN: u8 = 20;

/// Lowest frame rate.
pub const FPS_MIN: u32 = 20;
/// Highest frame rate.
pub const FPS_MAX: u32 = 100;
/// Frame rate hotkey step.
pub const FPS_STEP: u32 = 5;

/// Number of base palette colors.
pub const PALETTE_SIZE: u8 = 8;
/// Palette used when none is configured.
pub const DEFAULT_PALETTE: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 0];

/// Largest draw limit the menu will step up to.
pub const LIMIT_MAX: u64 = 1_000_000_000;

bitflags! {
    /// On/off switches, several of which can be flipped during a run.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct Toggles: u8 {
        /// Spawn pipes at random cells instead of the center.
        const RANDOM_START = 0b0000_0001;
        /// Let pipes leave the grid instead of turning away.
        const KEEP_ON_EDGE = 0b0000_0010;
        /// Emit color escape sequences.
        const COLOR = 0b0000_0100;
        /// Use the bright color variants.
        const VIVID = 0b0000_1000;
    }
}

impl Default for Toggles {
    fn default() -> Self {
        Self::COLOR | Self::VIVID
    }
}

/// A configuration rejected before the run starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Zero pipes requested.
    #[error("at least one pipe is required")]
    NoPipes,

    /// Frame rate outside the supported range.
    #[error("frame rate {0} is outside 20..=100")]
    FpsOutOfRange(u32),

    /// Straightness beyond the draw span.
    #[error("straightness {0} is outside 0..=20")]
    StraightOutOfRange(u8),

    /// No palette colors.
    #[error("the color palette is empty")]
    EmptyPalette,

    /// A palette entry outside `0..8`.
    #[error("palette color {0} is outside 0..=7")]
    ColorOutOfRange(u8),

    /// No glyph sets.
    #[error("no glyph set selected")]
    NoGlyphSets,
}

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of pipes.
    pub pipes: u16,
    /// Target frames per second.
    pub fps: u32,
    /// Turn bias; higher means straighter pipes.
    pub straight: u8,
    /// Glyphs drawn between full clears (0 = never clear).
    pub limit: u64,
    /// Colors pipes pick from.
    pub palette: Vec<u8>,
    /// Glyph sets pipes pick from.
    pub glyph_sets: Vec<GlyphSet>,
    /// Startup switches.
    pub toggles: Toggles,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipes: 5,
            fps: 75,
            straight: 15,
            limit: 1000,
            palette: DEFAULT_PALETTE.to_vec(),
            glyph_sets: vec![BUILTIN[0]],
            toggles: Toggles::default(),
        }
    }
}

impl Config {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipes == 0 {
            return Err(ConfigError::NoPipes);
        }
        if !(FPS_MIN..=FPS_MAX).contains(&self.fps) {
            return Err(ConfigError::FpsOutOfRange(self.fps));
        }
        if self.straight > STRAIGHT_SPAN {
            return Err(ConfigError::StraightOutOfRange(self.straight));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if let Some(&color) = self.palette.iter().find(|&&c| c >= PALETTE_SIZE) {
            return Err(ConfigError::ColorOutOfRange(color));
        }
        if self.glyph_sets.is_empty() {
            return Err(ConfigError::NoGlyphSets);
        }
        Ok(())
    }

    /// The live-adjustable part of this configuration.
    pub const fn settings(&self) -> Settings {
        Settings {
            straight: self.straight,
            fps: self.fps,
            toggles: self.toggles,
        }
    }
}

/// A single hotkey-driven change to [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Straighter pipes.
    Straighter,
    /// Curlier pipes.
    Curlier,
    /// Higher frame rate.
    Faster,
    /// Lower frame rate.
    Slower,
    /// Flip one or more toggles.
    Toggle(Toggles),
}

/// Settings the scheduler may change while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Turn bias.
    pub straight: u8,
    /// Target frames per second.
    pub fps: u32,
    /// Current switches.
    pub toggles: Toggles,
}

impl Settings {
    /// Sleep between ticks: `max(1, 1000 / fps)` milliseconds.
    pub fn frame_interval(&self) -> Duration {
        let millis = 1000 / self.fps.max(1);
        Duration::from_millis(u64::from(millis.max(1)))
    }

    /// Apply a hotkey adjustment, clamping to the user ranges.
    pub fn apply(&mut self, adjustment: Adjustment) {
        match adjustment {
            // Values outside the user range only ever move back towards it.
            Adjustment::Straighter => {
                self.straight = self.straight.max((self.straight + 1).min(STRAIGHT_MAX));
            }
            Adjustment::Curlier => {
                self.straight = self.straight.min(self.straight.saturating_sub(1).max(STRAIGHT_MIN));
            }
            Adjustment::Faster => self.fps = (self.fps + FPS_STEP).min(FPS_MAX),
            Adjustment::Slower => self.fps = self.fps.saturating_sub(FPS_STEP).max(FPS_MIN),
            Adjustment::Toggle(flags) => self.toggles.toggle(flags),
        }
    }

    /// Whether pipes may leave the grid.
    #[inline]
    pub const fn keep_on_edge(&self) -> bool {
        self.toggles.contains(Toggles::KEEP_ON_EDGE)
    }
}
