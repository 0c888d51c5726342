//! Actor Model: Keyboard input off the frame thread.
//!
//! A single input actor polls crossterm and forwards key presses over a
//! crossbeam channel. All state changes happen on the frame thread, which
//! drains at most one key per tick.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │  Frame Loop  │
//!        │          ResizeFlag         │              │
//!        └───────────────────────────▶ │              │
//!                                      └──────────────┘
//! ```

mod input;
mod messages;

pub use input::{InputActor, ResizeFlag};
pub use messages::{InputEvent, KeyCode};
