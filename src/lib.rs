//! # Termpipes
//!
//! The classic "pipes" screensaver for the terminal.
//!
//! A configurable number of pipes wander the character grid. Each tick a
//! pipe either carries on straight or turns 90°, and leaves a line-drawing
//! glyph matching the shape of its path behind it.
//!
//! ## Core Concepts
//!
//! - **Turn codes**: every (entry, exit) direction pair maps to one of 16
//!   glyph slots
//! - **Edge policy**: pipes turn away from the edge (and restyle on their
//!   next cell) unless keep-on-edge lets them run off
//! - **Cooperative frame loop**: one thread steps pipes, applies at most
//!   one hotkey and sleeps; an input actor only forwards keys
//!
//! ## Example
//!
//! ```rust,ignore
//! use termpipes::{Config, FrameScheduler, MemorySink, Grid, ResizeFlag};
//!
//! let (_keys, input) = crossbeam_channel::bounded(8);
//! let sink = MemorySink::new(Grid::new(80, 24));
//! let mut scheduler = FrameScheduler::new(
//!     &Config::default(),
//!     sink,
//!     rand::thread_rng(),
//!     input,
//!     ResizeFlag::new(),
//! )?;
//! scheduler.start()?;
//! scheduler.tick()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod cli;
pub mod config;
pub mod direction;
pub mod error;
pub mod glyph;
pub mod grid;
pub mod menu;
pub mod pipe;
pub mod scheduler;
pub mod terminal;

// Re-exports for convenience
pub use actor::{InputActor, InputEvent, KeyCode, ResizeFlag};
pub use config::{Adjustment, Config, ConfigError, Settings, Toggles};
pub use direction::{turn_code, Direction, TurnCode};
pub use error::{Error, Result};
pub use glyph::{GlyphSet, GlyphSetError, BUILTIN};
pub use grid::{Grid, Position};
pub use pipe::{Pipe, StepContext, Stroke};
pub use scheduler::{classify_key, FrameScheduler, FrameStats, KeyOutcome, SchedulerState};
pub use terminal::{Ink, MemorySink, RenderSink, TerminalSession, TerminalSink};
