use crossterm::style::Color;
use rand::Rng;
use tracing::info;

use crate::catalog::LevelCatalog;
use crate::config::Config;
use crate::error::LevelLoadError;
use crate::input::{is_pause_key, InputLatch};
use crate::level::{Level, LevelEvent};
use crate::render::{draw_centered, Canvas};
use crate::strategy::Direction;
use crate::TILE_SIZE;

/// Rows reserved under the maze for the score and help line.
pub const STRIP_ROWS: i32 = 2;

const RULES: [&str; 7] = [
    "RULES",
    "Eat every dot and fruit to clear the level.",
    "A ghost touching you restarts the level.",
    "Move with the arrow keys, WASD or hjkl.",
    "F1, p or a click on the help line pauses.",
    "q quits.",
    "Press any key to continue",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Splash,
    Playing,
    Paused,
}

/// The running game: current level, level cursor and score. Lives for the
/// whole process so pausing never resets it.
pub struct Session {
    config: Config,
    catalog: LevelCatalog,
    level: Level,
    score: u32,
}

impl Session {
    /// Starts from the first level of `catalog`, wherever its cursor was.
    pub fn start(mut catalog: LevelCatalog, config: Config) -> Result<Self, LevelLoadError> {
        catalog.first();
        let level = catalog.load_current(&config)?;
        Ok(Self {
            config,
            catalog,
            level,
            score: 0,
        })
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Runs one level frame and reacts to what it reports.
    pub fn advance(
        &mut self,
        held: Option<Direction>,
        rng: &mut impl Rng,
    ) -> Result<Vec<LevelEvent>, LevelLoadError> {
        let events = self.level.advance(held, rng);
        for event in &events {
            match *event {
                LevelEvent::PickupCollected { value, .. } => self.score += value,
                LevelEvent::LevelFailed => self.level.restart(),
                LevelEvent::LevelCompleted => {
                    self.catalog.next();
                    self.level = self.catalog.load_current(&self.config)?;
                }
            }
        }
        Ok(events)
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        self.level.render(canvas);
        let (w, h) = canvas.size();
        let strip_top = h - STRIP_ROWS * TILE_SIZE;
        canvas.fill_rect(0, strip_top, w, STRIP_ROWS * TILE_SIZE, Color::Black);
        draw_centered(
            canvas,
            &format!("Score : {}   {}", self.score, self.level.name()),
            strip_top,
            Color::Yellow,
        );
        draw_centered(
            canvas,
            "Press F1 or click here for the rules",
            strip_top + TILE_SIZE,
            Color::White,
        );
    }
}

pub struct GameStateMachine {
    state: GameState,
    session: Session,
}

impl GameStateMachine {
    pub fn new(catalog: LevelCatalog, config: Config) -> Result<Self, LevelLoadError> {
        Ok(Self {
            state: GameState::Splash,
            session: Session::start(catalog, config)?,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen_size(&self) -> (i32, i32) {
        let maze = self.session.level.maze();
        (
            maze.width() as i32 * TILE_SIZE,
            (maze.height() as i32 + STRIP_ROWS) * TILE_SIZE,
        )
    }

    fn change_state(&mut self, to: GameState, latch: &mut InputLatch) {
        info!(from = ?self.state, to = ?to, "state change");
        latch.clear();
        self.state = to;
    }

    pub fn update(
        &mut self,
        latch: &mut InputLatch,
        rng: &mut impl Rng,
    ) -> Result<Vec<LevelEvent>, LevelLoadError> {
        match self.state {
            GameState::Splash | GameState::Paused => {
                if latch.any() {
                    self.change_state(GameState::Playing, latch);
                }
                Ok(Vec::new())
            }
            GameState::Playing => {
                if self.pause_requested(latch) {
                    self.change_state(GameState::Paused, latch);
                    return Ok(Vec::new());
                }
                self.session.advance(latch.held, rng)
            }
        }
    }

    fn pause_requested(&self, latch: &InputLatch) -> bool {
        let key = latch.key_pressed && latch.last_key.map_or(false, is_pause_key);
        let strip_top = latch.screen_height - STRIP_ROWS * TILE_SIZE;
        let click = (latch.single_click || latch.double_click)
            && latch.pointer.map_or(false, |p| p.y > strip_top);
        key || click
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let (w, h) = canvas.size();
        match self.state {
            GameState::Splash => {
                canvas.fill_rect(0, 0, w, h, Color::Black);
                draw_centered(canvas, "P A C - M A N", h / 3, Color::Yellow);
                draw_centered(
                    canvas,
                    "Press any key or click to start",
                    h / 3 + 2 * TILE_SIZE,
                    Color::White,
                );
            }
            GameState::Playing => self.session.render(canvas),
            GameState::Paused => {
                canvas.fill_rect(0, 0, w, h, Color::Black);
                let top = h / 4;
                for (i, line) in RULES.iter().enumerate() {
                    let color = if i == 0 { Color::Yellow } else { Color::White };
                    draw_centered(canvas, line, top + i as i32 * TILE_SIZE, color);
                }
            }
        }
    }

    /// One tick: update, render, then drop this tick's input flags.
    pub fn tick(
        &mut self,
        latch: &mut InputLatch,
        canvas: &mut dyn Canvas,
        rng: &mut impl Rng,
    ) -> Result<Vec<LevelEvent>, LevelLoadError> {
        let events = self.update(latch, rng)?;
        self.render(canvas);
        latch.clear();
        Ok(events)
    }
}
