//! Frame Scheduler: The cooperative loop that drives the animation.
//!
//! Once per tick the scheduler:
//!
//! 1. reacts to a pending resize (clamp pipes, clear the screen),
//! 2. steps every pipe and draws its stroke, clearing the screen whenever
//!    the draw limit is reached,
//! 3. takes at most one key from the input channel and applies it,
//! 4. flushes the frame.
//!
//! [`run`](FrameScheduler::run) then sleeps for the frame interval. Input is
//! never observed mid-frame, so a quit request takes effect at a tick
//! boundary.
//!
//! ```text
//!   Idle ──start──▶ Running ──quit key──▶ Stopped
//! ```

use crate::actor::{InputEvent, KeyCode, ResizeFlag};
use crate::config::{Adjustment, Config, Settings, Toggles};
use crate::glyph::GlyphSet;
use crate::grid::Grid;
use crate::pipe::{Pipe, StepContext};
use crate::terminal::{Ink, RenderSink};
use crossbeam_channel::{Receiver, TryRecvError};
use rand::Rng;
use std::io;
use std::thread;

/// Lifecycle of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Constructed, nothing drawn yet.
    Idle,
    /// Ticking.
    Running,
    /// Quit requested and screen cleared. Terminal.
    Stopped,
}

/// What a single input event means to a running animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing to do.
    Continue,
    /// Change a live setting.
    Adjust(Adjustment),
    /// End the run.
    Quit,
}

/// Map an input event to its hotkey meaning.
///
/// `P`/`O` straighter/curlier, `F`/`D` faster/slower, `C` color,
/// `K` keep-on-edge, `V` vivid. Any other key quits.
pub fn classify_key(event: &InputEvent) -> KeyOutcome {
    match event {
        InputEvent::Key(code) => match code {
            KeyCode::Char('P') => KeyOutcome::Adjust(Adjustment::Straighter),
            KeyCode::Char('O') => KeyOutcome::Adjust(Adjustment::Curlier),
            KeyCode::Char('F') => KeyOutcome::Adjust(Adjustment::Faster),
            KeyCode::Char('D') => KeyOutcome::Adjust(Adjustment::Slower),
            KeyCode::Char('C') => KeyOutcome::Adjust(Adjustment::Toggle(Toggles::COLOR)),
            KeyCode::Char('K') => KeyOutcome::Adjust(Adjustment::Toggle(Toggles::KEEP_ON_EDGE)),
            KeyCode::Char('V') => KeyOutcome::Adjust(Adjustment::Toggle(Toggles::VIVID)),
            _ => KeyOutcome::Quit,
        },
        InputEvent::Error(message) => {
            tracing::warn!("input error: {message}");
            KeyOutcome::Continue
        }
        InputEvent::Shutdown => KeyOutcome::Quit,
    }
}

/// Counters kept across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Ticks completed.
    pub ticks: u64,
    /// Glyphs drawn in total.
    pub drawn: u64,
    /// Glyphs drawn since the last limit clear.
    pub since_clear: u64,
    /// Screen clears caused by the draw limit.
    pub limit_clears: u64,
    /// Resizes handled.
    pub resizes: u64,
}

/// Owns the pipes, the live settings and the sink, and ticks them.
pub struct FrameScheduler<S: RenderSink, R: Rng> {
    sink: S,
    rng: R,
    input: Receiver<InputEvent>,
    resize: ResizeFlag,
    pipes: Vec<Pipe>,
    palette: Vec<u8>,
    glyph_sets: Vec<GlyphSet>,
    limit: u64,
    settings: Settings,
    grid: Grid,
    state: SchedulerState,
    stats: FrameStats,
}

impl<S: RenderSink, R: Rng> FrameScheduler<S, R> {
    /// Build a scheduler and spawn its pipes.
    ///
    /// `config` is expected to be validated already.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot report its size.
    pub fn new(
        config: &Config,
        mut sink: S,
        mut rng: R,
        input: Receiver<InputEvent>,
        resize: ResizeFlag,
    ) -> io::Result<Self> {
        let grid = sink.size()?;
        let settings = config.settings();
        let ctx = StepContext {
            grid,
            straight: settings.straight,
            keep_on_edge: settings.keep_on_edge(),
            palette: &config.palette,
            glyph_sets: &config.glyph_sets,
        };
        let random_start = settings.toggles.contains(Toggles::RANDOM_START);
        let pipes = (0..config.pipes)
            .map(|_| Pipe::spawn(&mut rng, &ctx, random_start))
            .collect();

        Ok(Self {
            sink,
            rng,
            input,
            resize,
            pipes,
            palette: config.palette.clone(),
            glyph_sets: config.glyph_sets.clone(),
            limit: config.limit,
            settings,
            grid,
            state: SchedulerState::Idle,
            stats: FrameStats::default(),
        })
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Run counters.
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Live settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// All pipes.
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// Grid used for the last tick.
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// The sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Begin running: clear the screen.
    pub fn start(&mut self) -> io::Result<()> {
        if self.state != SchedulerState::Idle {
            return Ok(());
        }
        tracing::debug!(
            pipes = self.pipes.len(),
            grid = ?self.grid,
            fps = self.settings.fps,
            "scheduler start"
        );
        self.sink.clear();
        self.sink.flush()?;
        self.state = SchedulerState::Running;
        Ok(())
    }

    /// Advance one frame. Does nothing unless running.
    pub fn tick(&mut self) -> io::Result<SchedulerState> {
        if self.state != SchedulerState::Running {
            return Ok(self.state);
        }

        if self.resize.take() {
            self.handle_resize()?;
        }
        if !self.settings.keep_on_edge() {
            for pipe in &mut self.pipes {
                if !self.grid.contains(pipe.position()) {
                    pipe.clamp_to(self.grid);
                }
            }
        }

        self.draw_pipes();

        match self.poll_key() {
            KeyOutcome::Continue => {}
            KeyOutcome::Adjust(adjustment) => {
                self.settings.apply(adjustment);
                tracing::debug!(?adjustment, settings = ?self.settings, "hotkey");
            }
            KeyOutcome::Quit => {
                self.stats.ticks += 1;
                self.stop()?;
                return Ok(self.state);
            }
        }

        self.sink.flush()?;
        self.stats.ticks += 1;
        Ok(self.state)
    }

    /// Tick until a quit key arrives, sleeping between frames.
    pub fn run(&mut self) -> io::Result<FrameStats> {
        self.start()?;
        while self.tick()? == SchedulerState::Running {
            thread::sleep(self.settings.frame_interval());
        }
        Ok(self.stats)
    }

    /// Final clear and transition to [`SchedulerState::Stopped`].
    pub fn stop(&mut self) -> io::Result<()> {
        if self.state == SchedulerState::Stopped {
            return Ok(());
        }
        self.state = SchedulerState::Stopped;
        self.sink.clear();
        self.sink.flush()?;
        tracing::info!(drawn = self.stats.drawn, ticks = self.stats.ticks, "scheduler stopped");
        Ok(())
    }

    fn handle_resize(&mut self) -> io::Result<()> {
        let grid = self.sink.size()?;
        tracing::debug!(from = ?self.grid, to = ?grid, "resize");
        self.grid = grid;
        for pipe in &mut self.pipes {
            pipe.clamp_to(grid);
        }
        self.sink.clear();
        self.stats.resizes += 1;
        Ok(())
    }

    fn draw_pipes(&mut self) {
        let ctx = StepContext {
            grid: self.grid,
            straight: self.settings.straight,
            keep_on_edge: self.settings.keep_on_edge(),
            palette: &self.palette,
            glyph_sets: &self.glyph_sets,
        };
        let toggles = self.settings.toggles;

        for pipe in &mut self.pipes {
            let stroke = pipe.step(&ctx, &mut self.rng);
            // Off-grid strokes still count towards the total and the limit.
            if ctx.grid.contains(stroke.position) {
                let ink = toggles.contains(Toggles::COLOR).then(|| Ink {
                    color: stroke.color,
                    vivid: toggles.contains(Toggles::VIVID),
                });
                self.sink.draw(stroke.position, stroke.glyph, ink);
            }
            self.stats.drawn += 1;
            self.stats.since_clear += 1;

            if self.limit > 0 && self.stats.since_clear >= self.limit {
                tracing::debug!(drawn = self.stats.drawn, "draw limit reached, clearing");
                self.sink.clear();
                self.stats.since_clear = 0;
                self.stats.limit_clears += 1;
            }
        }
    }

    fn poll_key(&self) -> KeyOutcome {
        match self.input.try_recv() {
            Ok(event) => classify_key(&event),
            Err(TryRecvError::Empty) => KeyOutcome::Continue,
            Err(TryRecvError::Disconnected) => KeyOutcome::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::BUILTIN;
    use crate::grid::Position;
    use crate::terminal::{MemorySink, TerminalSink};
    use crossbeam_channel::{bounded, Sender};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestScheduler = FrameScheduler<MemorySink, StdRng>;

    fn scheduler(config: &Config, grid: Grid) -> (TestScheduler, Sender<InputEvent>, ResizeFlag) {
        let (tx, rx) = bounded(16);
        let resize = ResizeFlag::new();
        let scheduler = FrameScheduler::new(
            config,
            MemorySink::new(grid),
            StdRng::seed_from_u64(42),
            rx,
            resize.clone(),
        )
        .unwrap();
        (scheduler, tx, resize)
    }

    #[test]
    fn test_classify_hotkeys() {
        assert_eq!(
            classify_key(&InputEvent::char('P')),
            KeyOutcome::Adjust(Adjustment::Straighter)
        );
        assert_eq!(
            classify_key(&InputEvent::char('K')),
            KeyOutcome::Adjust(Adjustment::Toggle(Toggles::KEEP_ON_EDGE))
        );
        assert_eq!(classify_key(&InputEvent::char('p')), KeyOutcome::Quit);
        assert_eq!(classify_key(&InputEvent::Key(KeyCode::Esc)), KeyOutcome::Quit);
        assert_eq!(
            classify_key(&InputEvent::Error("boom".to_string())),
            KeyOutcome::Continue
        );
        assert_eq!(classify_key(&InputEvent::Shutdown), KeyOutcome::Quit);
    }

    #[test]
    fn test_lifecycle() {
        let config = Config { pipes: 2, ..Config::default() };
        let (mut scheduler, tx, _resize) = scheduler(&config, Grid::new(20, 10));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.tick().unwrap(), SchedulerState::Idle);

        scheduler.start().unwrap();
        assert_eq!(scheduler.tick().unwrap(), SchedulerState::Running);
        assert_eq!(scheduler.stats().drawn, 2);

        tx.send(InputEvent::char('q')).unwrap();
        assert_eq!(scheduler.tick().unwrap(), SchedulerState::Stopped);
        assert_eq!(scheduler.stats().drawn, 4);
        assert_eq!(scheduler.stats().ticks, 2);

        // Stopped is terminal.
        assert_eq!(scheduler.tick().unwrap(), SchedulerState::Stopped);
        assert_eq!(scheduler.stats().drawn, 4);
        // Start clear plus final clear.
        assert_eq!(scheduler.sink().clears(), 2);
    }

    #[test]
    fn test_draw_limit_clears_once() {
        let config = Config {
            pipes: 2,
            limit: 5,
            ..Config::default()
        };
        let (mut scheduler, _tx, _resize) = scheduler(&config, Grid::new(40, 20));
        scheduler.start().unwrap();
        for _ in 0..3 {
            scheduler.tick().unwrap();
        }

        let stats = scheduler.stats();
        assert_eq!(stats.drawn, 6);
        assert_eq!(stats.limit_clears, 1);
        assert_eq!(stats.since_clear, 1);
        assert_eq!(scheduler.sink().clears(), 2);
    }

    #[test]
    fn test_unlimited_never_clears() {
        let config = Config {
            pipes: 3,
            limit: 0,
            ..Config::default()
        };
        let (mut scheduler, _tx, _resize) = scheduler(&config, Grid::new(40, 20));
        scheduler.start().unwrap();
        for _ in 0..100 {
            scheduler.tick().unwrap();
        }
        assert_eq!(scheduler.stats().drawn, 300);
        assert_eq!(scheduler.stats().limit_clears, 0);
    }

    #[test]
    fn test_one_key_per_tick() {
        let config = Config { pipes: 1, ..Config::default() };
        let (mut scheduler, tx, _resize) = scheduler(&config, Grid::new(20, 10));
        scheduler.start().unwrap();

        tx.send(InputEvent::char('D')).unwrap();
        tx.send(InputEvent::char('D')).unwrap();
        tx.send(InputEvent::char('O')).unwrap();

        scheduler.tick().unwrap();
        assert_eq!(scheduler.settings().fps, 70);
        scheduler.tick().unwrap();
        assert_eq!(scheduler.settings().fps, 65);
        scheduler.tick().unwrap();
        assert_eq!(scheduler.settings().straight, 14);
        assert_eq!(scheduler.state(), SchedulerState::Running);
    }

    #[test]
    fn test_color_toggle_applies_to_next_glyph() {
        let config = Config { pipes: 1, ..Config::default() };
        let (mut scheduler, tx, _resize) = scheduler(&config, Grid::new(20, 10));
        scheduler.start().unwrap();

        scheduler.tick().unwrap();
        tx.send(InputEvent::char('C')).unwrap();
        scheduler.tick().unwrap();
        scheduler.tick().unwrap();

        let drawn = scheduler.sink().drawn();
        assert!(drawn[0].ink.is_some_and(|ink| ink.vivid));
        assert!(drawn[1].ink.is_some());
        assert_eq!(drawn[2].ink, None);
    }

    #[test]
    fn test_disconnected_input_quits() {
        let config = Config { pipes: 1, ..Config::default() };
        let (mut scheduler, tx, _resize) = scheduler(&config, Grid::new(20, 10));
        drop(tx);
        scheduler.start().unwrap();
        assert_eq!(scheduler.tick().unwrap(), SchedulerState::Stopped);
    }

    #[test]
    fn test_resize_clamps_pipes_and_clears() {
        let config = Config {
            pipes: 4,
            toggles: Toggles::default() | Toggles::RANDOM_START,
            ..Config::default()
        };
        let (mut scheduler, _tx, resize) = scheduler(&config, Grid::new(80, 40));
        scheduler.start().unwrap();
        scheduler.tick().unwrap();

        let small = Grid::new(6, 4);
        scheduler.sink_mut().resize(small);
        resize.raise();
        scheduler.tick().unwrap();

        assert_eq!(scheduler.grid(), small);
        assert_eq!(scheduler.stats().resizes, 1);
        assert_eq!(scheduler.sink().clears(), 2);
        for pipe in scheduler.pipes() {
            assert!(small.contains(pipe.position()));
        }
    }

    #[test]
    fn test_resize_between_ticks_waits_for_flag() {
        let config = Config {
            pipes: 6,
            toggles: Toggles::default() | Toggles::RANDOM_START,
            ..Config::default()
        };
        let (mut scheduler, _tx, resize) = scheduler(&config, Grid::new(60, 30));
        scheduler.start().unwrap();
        scheduler.tick().unwrap();

        // Terminal shrinks, notification not yet seen.
        let small = Grid::new(5, 3);
        scheduler.sink_mut().resize(small);
        let before = scheduler.sink().drawn().len();
        scheduler.tick().unwrap();
        assert_eq!(scheduler.grid(), Grid::new(60, 30));
        assert_eq!(scheduler.stats().resizes, 0);
        for drawn in &scheduler.sink().drawn()[before..] {
            assert!(small.contains(drawn.position));
        }

        resize.raise();
        scheduler.tick().unwrap();
        assert_eq!(scheduler.grid(), small);
        assert_eq!(scheduler.stats().resizes, 1);
        for pipe in scheduler.pipes() {
            assert!(small.contains(pipe.position()));
        }

        // A second notification with no size change still re-queries and clears.
        resize.raise();
        scheduler.tick().unwrap();
        assert_eq!(scheduler.grid(), small);
        assert_eq!(scheduler.stats().resizes, 2);
        assert_eq!(scheduler.sink().clears(), 3);
    }

    #[test]
    fn test_keep_on_edge_toggle_back_reclamps() {
        let config = Config {
            pipes: 1,
            straight: 20,
            toggles: Toggles::default() | Toggles::KEEP_ON_EDGE,
            ..Config::default()
        };
        let grid = Grid::new(4, 4);
        let (mut scheduler, tx, _resize) = scheduler(&config, grid);
        scheduler.start().unwrap();
        for _ in 0..6 {
            scheduler.tick().unwrap();
        }
        assert!(!grid.contains(scheduler.pipes()[0].position()));
        let visible = scheduler.sink().drawn().len();
        assert!(visible < 6);

        tx.send(InputEvent::char('K')).unwrap();
        scheduler.tick().unwrap();
        scheduler.tick().unwrap();
        assert!(grid.contains(scheduler.pipes()[0].position()));
        assert!(scheduler.sink().drawn().len() > visible);
    }

    #[test]
    fn test_off_grid_steps_are_counted() {
        let config = Config {
            pipes: 1,
            straight: 20,
            limit: 5,
            toggles: Toggles::default() | Toggles::KEEP_ON_EDGE,
            ..Config::default()
        };
        let grid = Grid::new(4, 4);
        let (mut scheduler, _tx, _resize) = scheduler(&config, grid);
        scheduler.start().unwrap();
        for _ in 0..6 {
            scheduler.tick().unwrap();
        }

        let stats = scheduler.stats();
        assert_eq!(stats.drawn, 6);
        assert_eq!(stats.limit_clears, 1);
        assert_eq!(stats.since_clear, 1);
        assert!(scheduler.sink().drawn().len() < 6);
        for drawn in scheduler.sink().drawn() {
            assert!(grid.contains(drawn.position));
        }
    }

    #[test]
    fn test_terminal_output_matches_pipe_positions() {
        let config = Config {
            pipes: 1,
            straight: 20,
            toggles: Toggles::empty(),
            ..Config::default()
        };
        let grid = Grid::new(12, 6);
        let (tx, rx) = bounded(4);
        let sink = TerminalSink::with_size(Vec::new(), grid);
        let mut scheduler =
            FrameScheduler::new(&config, sink, StdRng::seed_from_u64(3), rx, ResizeFlag::new())
                .unwrap();
        scheduler.start().unwrap();
        let start = scheduler.pipes()[0].position();
        assert_eq!(start, Position::new(6, 3));
        scheduler.tick().unwrap();

        let mut parser = vt100::Parser::new(grid.height, grid.width, 0);
        parser.process(scheduler.sink().writer());
        let cell = parser.screen().cell(3, 6).unwrap();
        assert!(["┃", "━"].contains(&cell.contents().as_str()));
        drop(tx);
    }
}
