//! Pipe: The per-pipe random walk.
//!
//! Each tick a pipe decides where to go next, reports the glyph for the
//! cell it is leaving as a [`Stroke`], and moves one cell. A pipe never
//! reverses on itself: the exit direction is always straight ahead or a
//! 90° turn from the entry direction.
//!
//! Color and glyph-set changes triggered at an edge are *deferred*. They are
//! recorded as pending and only take effect at the start of the next step,
//! so the corner glyph that turns the pipe away from the edge is still
//! drawn in the old style.

use crate::config::STRAIGHT_SPAN;
use crate::direction::{turn_code, Direction, TurnCode};
use crate::glyph::GlyphSet;
use crate::grid::{Grid, Position};
use rand::Rng;

/// Everything a pipe needs to take one step.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Current grid bounds.
    pub grid: Grid,
    /// Turn bias (see [`STRAIGHT_SPAN`]).
    pub straight: u8,
    /// Whether pipes may leave the grid.
    pub keep_on_edge: bool,
    /// Colors to pick from on recolor.
    pub palette: &'a [u8],
    /// Active glyph sets; a pipe's set index points into this slice.
    pub glyph_sets: &'a [GlyphSet],
}

/// Render instruction produced by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    /// Cell the pipe was leaving.
    pub position: Position,
    /// Shape of the glyph.
    pub code: TurnCode,
    /// The glyph itself, resolved from the pipe's set.
    pub glyph: char,
    /// Palette color in `0..8`.
    pub color: u8,
}

/// State of one pipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipe {
    position: Position,
    entry: Direction,
    exit: Direction,
    color: u8,
    glyph_set: usize,
    pending_color: Option<u8>,
    pending_glyph_set: Option<usize>,
}

impl Pipe {
    /// Create a pipe at `position` heading `direction`.
    pub const fn new(position: Position, direction: Direction, color: u8, glyph_set: usize) -> Self {
        Self {
            position,
            entry: direction,
            exit: direction,
            color,
            glyph_set,
            pending_color: None,
            pending_glyph_set: None,
        }
    }

    /// Create a pipe with a random heading, color and glyph set.
    ///
    /// The pipe starts at the grid center unless `random_start` is set.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, ctx: &StepContext<'_>, random_start: bool) -> Self {
        let position = if random_start && !ctx.grid.is_empty() {
            Position::new(
                rng.gen_range(0..i32::from(ctx.grid.width)),
                rng.gen_range(0..i32::from(ctx.grid.height)),
            )
        } else {
            ctx.grid.center()
        };
        let direction = Direction::from_index(rng.gen_range(0..4));
        Self::new(position, direction, pick_color(rng, ctx.palette), pick_set(rng, ctx.glyph_sets))
    }

    /// Current cell.
    #[inline]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Direction the pipe will enter its next cell from.
    #[inline]
    pub const fn entry(&self) -> Direction {
        self.entry
    }

    /// Exit direction chosen by the last step.
    #[inline]
    pub const fn exit(&self) -> Direction {
        self.exit
    }

    /// Current palette color.
    #[inline]
    pub const fn color(&self) -> u8 {
        self.color
    }

    /// Current index into the active glyph sets.
    #[inline]
    pub const fn glyph_set(&self) -> usize {
        self.glyph_set
    }

    /// Color scheduled for the next step, if any.
    #[inline]
    pub const fn pending_color(&self) -> Option<u8> {
        self.pending_color
    }

    /// Glyph set scheduled for the next step, if any.
    #[inline]
    pub const fn pending_glyph_set(&self) -> Option<usize> {
        self.pending_glyph_set
    }

    /// Pull the pipe back onto `grid`. Heading and style are kept.
    pub fn clamp_to(&mut self, grid: Grid) {
        self.position = grid.clamp(self.position);
    }

    /// Advance one cell.
    ///
    /// Returns the stroke for the cell being left. The stroke's position may
    /// be off-grid when `keep_on_edge` has let the pipe wander away.
    pub fn step<R: Rng + ?Sized>(&mut self, ctx: &StepContext<'_>, rng: &mut R) -> Stroke {
        if let Some(color) = self.pending_color.take() {
            self.color = color;
        }
        if let Some(set) = self.pending_glyph_set.take() {
            self.glyph_set = set;
        }

        let mut exit = self.entry;
        if rng.gen_range(0..STRAIGHT_SPAN) >= ctx.straight {
            exit = if rng.gen_bool(0.5) {
                self.entry.turn_left()
            } else {
                self.entry.turn_right()
            };
        }

        if !ctx.keep_on_edge && !ctx.grid.contains(self.position.moved(exit)) {
            self.pending_color = Some(pick_color(rng, ctx.palette));
            self.pending_glyph_set = Some(pick_set(rng, ctx.glyph_sets));
            exit = self.turn_away(ctx.grid, rng);
        }

        let code = turn_code(self.entry, exit);
        let glyph = ctx
            .glyph_sets
            .get(self.glyph_set)
            .or_else(|| ctx.glyph_sets.first())
            .map_or(' ', |set| set.glyph(code));
        let stroke = Stroke {
            position: self.position,
            code,
            glyph,
            color: self.color,
        };

        self.exit = exit;
        self.entry = exit;
        self.position = self.position.moved(exit);
        stroke
    }

    /// Pick an in-bounds turn; continue straight if neither turn fits.
    fn turn_away<R: Rng + ?Sized>(&self, grid: Grid, rng: &mut R) -> Direction {
        let left = self.entry.turn_left();
        let right = self.entry.turn_right();
        let left_ok = grid.contains(self.position.moved(left));
        let right_ok = grid.contains(self.position.moved(right));
        match (left_ok, right_ok) {
            (true, true) => {
                if rng.gen_bool(0.5) {
                    left
                } else {
                    right
                }
            }
            (true, false) => left,
            (false, true) => right,
            (false, false) => self.entry,
        }
    }
}

fn pick_color<R: Rng + ?Sized>(rng: &mut R, palette: &[u8]) -> u8 {
    if palette.is_empty() {
        return 0;
    }
    palette[rng.gen_range(0..palette.len())]
}

fn pick_set<R: Rng + ?Sized>(rng: &mut R, glyph_sets: &[GlyphSet]) -> usize {
    if glyph_sets.len() <= 1 {
        return 0;
    }
    rng.gen_range(0..glyph_sets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::BUILTIN;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NEVER_TURN: u8 = STRAIGHT_SPAN;

    fn ctx<'a>(grid: Grid, straight: u8, palette: &'a [u8], sets: &'a [GlyphSet]) -> StepContext<'a> {
        StepContext {
            grid,
            straight,
            keep_on_edge: false,
            palette,
            glyph_sets: sets,
        }
    }

    #[test]
    fn test_straight_run_across_grid() {
        let sets = [BUILTIN[0]];
        let ctx = ctx(Grid::new(10, 10), NEVER_TURN, &[1], &sets);
        let mut rng = StdRng::seed_from_u64(7);
        let mut pipe = Pipe::new(Position::new(5, 5), Direction::Right, 1, 0);

        for x in 5..9 {
            let stroke = pipe.step(&ctx, &mut rng);
            assert_eq!(stroke.position, Position::new(x, 5));
            assert_eq!(stroke.glyph, '━');
        }
        assert_eq!(pipe.position(), Position::new(9, 5));
        assert_eq!(pipe.pending_color(), None);
    }

    #[test]
    fn test_edge_forces_perpendicular_turn() {
        let sets = [BUILTIN[0]];
        let ctx = ctx(Grid::new(3, 3), NEVER_TURN, &[4], &sets);
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pipe = Pipe::new(Position::new(2, 1), Direction::Right, 1, 0);
            let stroke = pipe.step(&ctx, &mut rng);

            assert!(matches!(pipe.exit(), Direction::Up | Direction::Down));
            assert!(Grid::new(3, 3).contains(pipe.position()));
            assert_eq!(stroke.color, 1);
            assert_eq!(pipe.color(), 1);
            assert_eq!(pipe.pending_color(), Some(4));
            assert_eq!(pipe.pending_glyph_set(), Some(0));
        }
    }

    #[test]
    fn test_deferred_change_applies_on_next_step() {
        let sets = [BUILTIN[0], BUILTIN[4]];
        let ctx = ctx(Grid::new(3, 3), NEVER_TURN, &[6], &sets);
        let mut rng = StdRng::seed_from_u64(11);
        let mut pipe = Pipe::new(Position::new(2, 1), Direction::Right, 2, 0);

        let first = pipe.step(&ctx, &mut rng);
        assert_eq!(first.color, 2);
        assert_eq!(first.glyph, BUILTIN[0].glyph(first.code));
        let next_set = pipe.pending_glyph_set().unwrap();

        let second = pipe.step(&ctx, &mut rng);
        assert_eq!(second.color, 6);
        assert_eq!(second.glyph, sets[next_set].glyph(second.code));
        assert_eq!(pipe.color(), 6);
        assert_eq!(pipe.glyph_set(), next_set);
    }

    #[test]
    fn test_entry_tracks_previous_exit() {
        let sets = [BUILTIN[2]];
        let ctx = ctx(Grid::new(20, 12), 5, &[1, 2, 3], &sets);
        let mut rng = StdRng::seed_from_u64(3);
        let mut pipe = Pipe::new(Position::new(10, 6), Direction::Up, 1, 0);

        for _ in 0..500 {
            let before = pipe.entry();
            let from = pipe.position();
            let stroke = pipe.step(&ctx, &mut rng);
            let exit = pipe.exit();

            assert_eq!(pipe.entry(), exit);
            assert_ne!(exit, before.turn_left().turn_left(), "reversal");
            assert_eq!(stroke.code, turn_code(before, exit));
            assert_eq!(pipe.position(), from.moved(exit));
        }
    }

    #[test]
    fn test_stays_in_bounds_without_keep_on_edge() {
        let sets = [BUILTIN[1], BUILTIN[3]];
        let grid = Grid::new(7, 4);
        let ctx = ctx(grid, 5, &[1, 5], &sets);
        let mut rng = StdRng::seed_from_u64(99);
        let mut pipe = Pipe::spawn(&mut rng, &ctx, true);

        for _ in 0..2000 {
            let stroke = pipe.step(&ctx, &mut rng);
            assert!(grid.contains(stroke.position));
            assert!(grid.contains(pipe.position()));
        }
    }

    #[test]
    fn test_keep_on_edge_walks_off_grid() {
        let sets = [BUILTIN[0]];
        let mut ctx = ctx(Grid::new(3, 3), NEVER_TURN, &[3], &sets);
        ctx.keep_on_edge = true;
        let mut rng = StdRng::seed_from_u64(5);
        let mut pipe = Pipe::new(Position::new(2, 1), Direction::Right, 1, 0);

        pipe.step(&ctx, &mut rng);
        assert_eq!(pipe.position(), Position::new(3, 1));
        assert_eq!(pipe.pending_color(), None);

        pipe.clamp_to(ctx.grid);
        assert_eq!(pipe.position(), Position::new(2, 1));
        assert_eq!(pipe.entry(), Direction::Right);
    }

    #[test]
    fn test_single_cell_grid_continues_straight() {
        let sets = [BUILTIN[0]];
        let ctx = ctx(Grid::new(1, 1), NEVER_TURN, &[1], &sets);
        let mut rng = StdRng::seed_from_u64(1);
        let mut pipe = Pipe::new(Position::new(0, 0), Direction::Down, 1, 0);

        pipe.step(&ctx, &mut rng);
        assert_eq!(pipe.exit(), Direction::Down);
        assert_eq!(pipe.position(), Position::new(0, 1));
    }

    #[test]
    fn test_spawn_centered() {
        let sets = [BUILTIN[0]];
        let ctx = ctx(Grid::new(80, 24), 15, &[2], &sets);
        let mut rng = StdRng::seed_from_u64(0);
        let pipe = Pipe::spawn(&mut rng, &ctx, false);
        assert_eq!(pipe.position(), Position::new(40, 12));
        assert_eq!(pipe.color(), 2);
        assert_eq!(pipe.glyph_set(), 0);
    }

    #[test]
    fn test_replay_from_same_state_is_identical() {
        let sets = [BUILTIN[0], BUILTIN[5]];
        let ctx = ctx(Grid::new(30, 10), 8, &[1, 2, 3, 4], &sets);
        let mut rng = StdRng::seed_from_u64(21);
        let pipes: Vec<Pipe> = (0..4).map(|_| Pipe::spawn(&mut rng, &ctx, true)).collect();

        let run = |mut pipes: Vec<Pipe>, mut rng: StdRng| {
            let mut strokes = Vec::new();
            for _ in 0..50 {
                for pipe in &mut pipes {
                    strokes.push(pipe.step(&ctx, &mut rng));
                }
            }
            strokes
        };
        assert_eq!(run(pipes.clone(), rng.clone()), run(pipes, rng));
    }
}
