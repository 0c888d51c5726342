//! Pre-run menu: Tweak the configuration before the animation starts.
//!
//! Shown when the program is started without arguments. Keys are
//! case-insensitive; Enter starts the run, Esc or `q` leaves without one.

use crate::actor::{InputEvent, KeyCode, ResizeFlag};
use crate::config::{
    Config, Toggles, FPS_MAX, FPS_MIN, FPS_STEP, LIMIT_MAX, STRAIGHT_MAX, STRAIGHT_MIN,
};
use crate::glyph::{GlyphSet, BUILTIN, BUILTIN_COUNT};
use crate::terminal::OutputBuffer;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::io::{self, Write};
use std::time::Duration;

/// Result of feeding one key to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// A setting changed; redraw.
    Redraw,
    /// The key meant nothing.
    Ignored,
    /// Start the animation.
    Start,
    /// Leave without running.
    Quit,
}

/// Menu state: a draft configuration.
#[derive(Debug, Clone)]
pub struct Menu {
    config: Config,
    builtin_index: usize,
}

impl Menu {
    /// Start editing `config`.
    pub fn new(config: Config) -> Self {
        let builtin_index = config
            .glyph_sets
            .first()
            .and_then(|set| BUILTIN.iter().position(|b| b == set))
            .unwrap_or(0);
        Self {
            config,
            builtin_index,
        }
    }

    /// The draft configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the menu, keeping the draft.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Apply one key.
    pub fn handle_key(&mut self, code: KeyCode) -> MenuOutcome {
        let c = match code {
            KeyCode::Enter => return MenuOutcome::Start,
            KeyCode::Esc => return MenuOutcome::Quit,
            KeyCode::Char(c) => c.to_ascii_lowercase(),
            _ => return MenuOutcome::Ignored,
        };

        let config = &mut self.config;
        match c {
            'q' => return MenuOutcome::Quit,
            '\r' | '\n' => return MenuOutcome::Start,
            'a' => config.pipes = config.pipes.saturating_add(1),
            'z' => config.pipes = config.pipes.saturating_sub(1).max(1),
            's' => config.straight = (config.straight + 1).min(STRAIGHT_MAX),
            'x' => config.straight = config.straight.saturating_sub(1).max(STRAIGHT_MIN),
            'f' => config.fps = (config.fps + FPS_STEP).min(FPS_MAX),
            'd' => config.fps = config.fps.saturating_sub(FPS_STEP).max(FPS_MIN),
            'l' => config.limit = raise_limit(config.limit),
            'j' => config.limit = lower_limit(config.limit),
            'r' => config.toggles.toggle(Toggles::RANDOM_START),
            'k' => config.toggles.toggle(Toggles::KEEP_ON_EDGE),
            'c' => config.toggles.toggle(Toggles::COLOR),
            'v' => config.toggles.toggle(Toggles::VIVID),
            't' => {
                self.builtin_index = (self.builtin_index + 1) % BUILTIN_COUNT;
                config.glyph_sets = vec![BUILTIN[self.builtin_index]];
            }
            _ => return MenuOutcome::Ignored,
        }
        MenuOutcome::Redraw
    }

    /// Draw the menu into `out`.
    pub fn render(&self, out: &mut OutputBuffer) {
        let config = &self.config;
        let limit = if config.limit == 0 {
            "infinite".to_string()
        } else {
            config.limit.to_string()
        };
        let lines = [
            "PIPES - pre-run menu (press Enter to start)".to_string(),
            String::new(),
            format!("A/Z  Pipes:            {}", config.pipes),
            format!("S/X  Straight [{STRAIGHT_MIN}..{STRAIGHT_MAX}]: {}", config.straight),
            format!("F/D  FPS [{FPS_MIN}..{FPS_MAX}]:    {}", config.fps),
            format!("L/J  Limit chars:      {limit}"),
            format!("R    Random start:     {}", on_off(config.toggles, Toggles::RANDOM_START)),
            format!("K    Keep on edge:     {}", on_off(config.toggles, Toggles::KEEP_ON_EDGE)),
            format!("C    Color enabled:    {}", on_off(config.toggles, Toggles::COLOR)),
            format!("V    Vivid colors:     {}", on_off(config.toggles, Toggles::VIVID)),
            format!(
                "T    Type set:         {} {} (0..9)",
                self.builtin_index,
                preview(&BUILTIN[self.builtin_index])
            ),
            String::new(),
            "Enter to start  |  Esc/Q to quit".to_string(),
        ];

        out.clear_screen();
        for (row, line) in (1u16..).zip(lines.iter()) {
            out.cursor_move(2, row);
            out.write_str(line);
        }
    }
}

/// `L`: unlimited jumps to 1000, otherwise ×10 up to [`LIMIT_MAX`].
const fn raise_limit(limit: u64) -> u64 {
    if limit == 0 {
        1000
    } else {
        let next = limit.saturating_mul(10);
        if next > LIMIT_MAX {
            LIMIT_MAX
        } else {
            next
        }
    }
}

/// `J`: unlimited jumps to 1000 first, then ÷10; below 10 means unlimited.
const fn lower_limit(limit: u64) -> u64 {
    let base = if limit == 0 { 1000 } else { limit };
    let next = base / 10;
    if next < 10 {
        0
    } else {
        next
    }
}

fn on_off(toggles: Toggles, flag: Toggles) -> &'static str {
    if toggles.contains(flag) {
        "ON"
    } else {
        "OFF"
    }
}

fn preview(set: &GlyphSet) -> String {
    let g = set.glyphs();
    // Up→Right, Right→Right, Right→Down, Down→Down
    [g[1], g[5], g[6], g[10]].iter().collect()
}

/// Show the menu until the user starts or quits.
///
/// Returns the edited configuration, or `None` if the user quit.
pub fn run_menu<W: Write>(
    config: Config,
    input: &Receiver<InputEvent>,
    resize: &ResizeFlag,
    writer: &mut W,
) -> io::Result<Option<Config>> {
    let mut menu = Menu::new(config);
    let mut out = OutputBuffer::new();
    let mut dirty = true;

    loop {
        if resize.take() {
            dirty = true;
        }
        if dirty {
            out.clear();
            menu.render(&mut out);
            out.flush_to(writer)?;
            dirty = false;
        }

        match input.recv_timeout(Duration::from_millis(10)) {
            Ok(InputEvent::Key(code)) => match menu.handle_key(code) {
                MenuOutcome::Redraw => dirty = true,
                MenuOutcome::Ignored => {}
                MenuOutcome::Start => return Ok(Some(menu.into_config())),
                MenuOutcome::Quit => return Ok(None),
            },
            Ok(InputEvent::Error(message)) => tracing::warn!("input error: {message}"),
            Ok(InputEvent::Shutdown) | Err(RecvTimeoutError::Disconnected) => return Ok(None),
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}
