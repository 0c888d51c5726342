//! Terminal module: Everything that touches the output device.
//!
//! - [`OutputBuffer`]: ANSI byte builder
//! - [`RenderSink`]: the drawing interface used by the scheduler
//! - [`TerminalSession`]: raw mode on entry, restore on exit

mod output;
mod session;
mod sink;

pub use output::{Ink, OutputBuffer};
pub use session::TerminalSession;
pub use sink::{Drawn, MemorySink, RenderSink, TerminalSink};
