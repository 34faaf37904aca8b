use crossterm::style::Color;
use rand::Rng;
use tracing::{debug, info};

use crate::actor::{Actor, ActorKind};
use crate::config::Config;
use crate::error::LevelLoadError;
use crate::maze::Maze;
use crate::pickup::{self, Pickup, PickupKind};
use crate::render::Canvas;
use crate::strategy::{Direction, Surroundings};
use crate::{Point, TILE_SIZE};

const WALL_COLOR: Color = Color::Rgb {
    r: 0x14,
    g: 0x2b,
    b: 0x51,
};
const CORRIDOR_COLOR: Color = Color::Black;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub kind: ActorKind,
    pub col: usize,
    pub row: usize,
}

impl Spawn {
    pub const fn new(kind: ActorKind, col: usize, row: usize) -> Self {
        Self { kind, col, row }
    }
}

/// Outcome of a frame, handed to whoever drives the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelEvent {
    PickupCollected { kind: PickupKind, value: u32 },
    LevelCompleted,
    LevelFailed,
}

pub struct Level {
    name: String,
    maze: Maze,
    pickups: Vec<Pickup>,
    actors: Vec<Actor>,
    player: usize,
}

impl Level {
    /// Builds a level from parsed map text. The spawn list must hold exactly
    /// one player and every spawn must be on a walkable tile.
    pub fn from_map(
        name: impl Into<String>,
        map: &str,
        spawns: &[Spawn],
        config: &Config,
    ) -> Result<Self, LevelLoadError> {
        let maze = Maze::parse(map)?;
        Self::new(name, maze, spawns, config)
    }

    pub fn new(
        name: impl Into<String>,
        maze: Maze,
        spawns: &[Spawn],
        config: &Config,
    ) -> Result<Self, LevelLoadError> {
        let players = spawns.iter().filter(|s| s.kind.is_player()).count();
        if players != 1 {
            return Err(LevelLoadError::PlayerCount(players));
        }
        if let Some(s) = spawns.iter().find(|s| maze.is_wall_tile(s.col, s.row)) {
            return Err(LevelLoadError::SpawnBlocked {
                kind: s.kind,
                col: s.col,
                row: s.row,
            });
        }

        let actors: Vec<Actor> = spawns
            .iter()
            .map(|s| {
                Actor::new(
                    s.kind,
                    Point::tile_center(s.col, s.row),
                    config.speed,
                    config.frame_rate,
                )
            })
            .collect();
        let player = actors
            .iter()
            .position(|a| a.kind().is_player())
            .ok_or(LevelLoadError::PlayerCount(0))?;
        let pickups = pickup::spawn_all(&maze);
        let name = name.into();
        info!(
            stage = %name,
            width = maze.width(),
            height = maze.height(),
            pickups = pickups.len(),
            actors = actors.len(),
            "level loaded"
        );

        Ok(Self {
            name,
            maze,
            pickups,
            actors,
            player,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut [Actor] {
        &mut self.actors
    }

    pub fn player(&self) -> &Actor {
        &self.actors[self.player]
    }

    pub fn is_completed(&self) -> bool {
        self.pickups.is_empty()
    }

    /// Runs one frame: moves every actor, then either reports completion (the
    /// level was already cleared when the frame began) or checks pickups and
    /// chaser contact.
    pub fn advance(&mut self, input: Option<Direction>, rng: &mut impl Rng) -> Vec<LevelEvent> {
        let cleared = self.is_completed();

        for idx in 0..self.actors.len() {
            let around = Surroundings {
                maze: &self.maze,
                player: self.actors[self.player].position(),
                input,
            };
            self.actors[idx].advance(&around, rng);
        }

        if cleared {
            info!(stage = %self.name, "level completed");
            return vec![LevelEvent::LevelCompleted];
        }

        let player = self.player().position();
        let (taken, left): (Vec<Pickup>, Vec<Pickup>) = std::mem::take(&mut self.pickups)
            .into_iter()
            .partition(|p| p.is_reached_by(player));
        self.pickups = left;

        let mut events: Vec<LevelEvent> = taken
            .iter()
            .map(|p| {
                debug!(
                    kind = ?p.kind,
                    value = p.value(),
                    x = p.pos.x,
                    y = p.pos.y,
                    "pickup collected"
                );
                LevelEvent::PickupCollected {
                    kind: p.kind,
                    value: p.value(),
                }
            })
            .collect();

        let caught = self
            .actors
            .iter()
            .enumerate()
            .any(|(idx, a)| idx != self.player && a.overlaps(player));
        if caught {
            info!(stage = %self.name, x = player.x, y = player.y, "player caught");
            events.push(LevelEvent::LevelFailed);
        }
        events
    }

    /// Puts every actor back on its spawn. Collected pickups stay collected.
    pub fn restart(&mut self) {
        for actor in &mut self.actors {
            actor.respawn();
        }
        info!(stage = %self.name, "level restarted");
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        for (col, row, _) in self.maze.tiles() {
            let color = if self.maze.is_wall_tile(col, row) {
                WALL_COLOR
            } else {
                CORRIDOR_COLOR
            };
            canvas.fill_rect(
                col as i32 * TILE_SIZE,
                row as i32 * TILE_SIZE,
                TILE_SIZE,
                TILE_SIZE,
                color,
            );
        }
        for p in &self.pickups {
            let at = p.draw_origin();
            canvas.draw_sprite(p.sprite(), at.x, at.y);
        }
        for a in &self.actors {
            let at = a.draw_origin();
            canvas.draw_sprite(a.sprite(), at.x, at.y);
        }
    }
}
