//! Render sinks: Where strokes end up.
//!
//! The scheduler only ever talks to the screen through [`RenderSink`].
//! [`TerminalSink`] writes ANSI sequences to a real terminal;
//! [`MemorySink`] records what would have been drawn, for headless runs.

use super::output::{Ink, OutputBuffer};
use crate::grid::{Grid, Position};
use std::io::{self, Stdout, Write};

/// The output device as seen by the scheduler.
pub trait RenderSink {
    /// Query the current grid size in cells.
    ///
    /// Draw calls after this are clipped to the returned grid.
    fn size(&mut self) -> io::Result<Grid>;

    /// Put `glyph` at `pos`, colored with `ink` or uncolored when `None`.
    ///
    /// Off-grid positions are ignored.
    fn draw(&mut self, pos: Position, glyph: char, ink: Option<Ink>);

    /// Erase the whole screen.
    fn clear(&mut self);

    /// Push everything drawn so far to the device.
    fn flush(&mut self) -> io::Result<()>;
}

/// A sink writing ANSI escape sequences to a terminal.
///
/// Output is buffered per frame and written with one syscall on
/// [`flush`](RenderSink::flush).
pub struct TerminalSink<W: Write = Stdout> {
    writer: W,
    output: OutputBuffer,
    grid: Grid,
    /// Fixed size instead of asking the terminal.
    fixed: bool,
}

impl TerminalSink<Stdout> {
    /// Sink for the process's stdout, sized from the terminal.
    pub fn stdout() -> io::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self {
            writer: io::stdout(),
            output: OutputBuffer::with_capacity(16 * 1024),
            grid: Grid::new(width, height),
            fixed: false,
        })
    }
}

impl<W: Write> TerminalSink<W> {
    /// Sink writing to `writer` with a fixed grid size.
    pub fn with_size(writer: W, grid: Grid) -> Self {
        Self {
            writer,
            output: OutputBuffer::with_capacity(16 * 1024),
            grid,
            fixed: true,
        }
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn size(&mut self) -> io::Result<Grid> {
        if !self.fixed {
            let (width, height) = crossterm::terminal::size()?;
            self.grid = Grid::new(width, height);
        }
        Ok(self.grid)
    }

    fn draw(&mut self, pos: Position, glyph: char, ink: Option<Ink>) {
        let Some((x, y)) = self.grid.cell(pos) else {
            return;
        };
        self.output.cursor_move(x, y);
        if let Some(ink) = ink {
            self.output.set_fg(ink);
            self.output.write_char(glyph);
            self.output.reset_attrs();
        } else {
            self.output.write_char(glyph);
        }
    }

    fn clear(&mut self) {
        self.output.clear_screen();
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.output.is_empty() {
            self.output.flush_to(&mut self.writer)?;
            self.output.clear();
        }
        Ok(())
    }
}

/// One glyph recorded by a [`MemorySink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawn {
    /// Cell it was drawn at.
    pub position: Position,
    /// The glyph.
    pub glyph: char,
    /// Its color, if color was on.
    pub ink: Option<Ink>,
}

/// A headless sink that records draw calls.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    grid: Grid,
    drawn: Vec<Drawn>,
    clears: usize,
}

impl MemorySink {
    /// Create a sink reporting `grid` as its size.
    pub const fn new(grid: Grid) -> Self {
        Self {
            grid,
            drawn: Vec::new(),
            clears: 0,
        }
    }

    /// Pretend the terminal was resized.
    pub fn resize(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Everything drawn since creation, in order.
    pub fn drawn(&self) -> &[Drawn] {
        &self.drawn
    }

    /// Number of screen clears.
    pub const fn clears(&self) -> usize {
        self.clears
    }
}

impl RenderSink for MemorySink {
    fn size(&mut self) -> io::Result<Grid> {
        Ok(self.grid)
    }

    fn draw(&mut self, position: Position, glyph: char, ink: Option<Ink>) {
        if self.grid.contains(position) {
            self.drawn.push(Drawn { position, glyph, ink });
        }
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
