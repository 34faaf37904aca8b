use std::fs;

use tracing::{info, warn};

use crate::actor::ActorKind;
use crate::config::Config;
use crate::error::LevelLoadError;
use crate::level::{Level, Spawn};

/// Map of the first level, compiled in so a broken assets directory still
/// leaves something to play.
pub const DEFAULT_MAP: &str = include_str!("../assets/maze.txt");
pub const DEFAULT_LEVEL_NAME: &str = "Level 1";

const LEVEL_1_SPAWNS: [Spawn; 5] = [
    Spawn::new(ActorKind::Pacman, 13, 23),
    Spawn::new(ActorKind::Blinky, 1, 5),
    Spawn::new(ActorKind::Pinky, 14, 13),
    Spawn::new(ActorKind::Inky, 12, 13),
    Spawn::new(ActorKind::Clyde, 15, 8),
];

const LEVEL_2_SPAWNS: [Spawn; 5] = [
    Spawn::new(ActorKind::Pacman, 13, 20),
    Spawn::new(ActorKind::Blinky, 26, 1),
    Spawn::new(ActorKind::Pinky, 14, 12),
    Spawn::new(ActorKind::Inky, 12, 12),
    Spawn::new(ActorKind::Clyde, 1, 23),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelSpec {
    pub name: String,
    pub file: String,
    pub spawns: Vec<Spawn>,
}

impl LevelSpec {
    pub fn new(name: impl Into<String>, file: impl Into<String>, spawns: &[Spawn]) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            spawns: spawns.to_vec(),
        }
    }
}

/// Ordered levels with a cursor. Moving past the last level wraps around.
#[derive(Clone, Debug)]
pub struct LevelCatalog {
    levels: Vec<LevelSpec>,
    cursor: usize,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelSpec>) -> Self {
        if levels.is_empty() {
            return Self::builtin();
        }
        Self { levels, cursor: 0 }
    }

    pub fn builtin() -> Self {
        Self {
            levels: vec![
                LevelSpec::new(DEFAULT_LEVEL_NAME, "maze.txt", &LEVEL_1_SPAWNS),
                LevelSpec::new("Level 2", "maze2.txt", &LEVEL_2_SPAWNS),
            ],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1) % self.levels.len();
    }

    pub fn current(&self) -> &LevelSpec {
        &self.levels[self.cursor]
    }

    /// Loads the level under the cursor from the assets directory. A map that
    /// cannot be loaded is replaced by the built-in first level.
    pub fn load_current(&self, config: &Config) -> Result<Level, LevelLoadError> {
        let spec = self.current();
        match load_spec(spec, config) {
            Ok(level) => Ok(level),
            Err(err) => {
                warn!(
                    stage = %spec.name,
                    error = %err,
                    "map failed to load, using the default level"
                );
                load_default(config)
            }
        }
    }
}

fn load_spec(spec: &LevelSpec, config: &Config) -> Result<Level, LevelLoadError> {
    let path = config.assets_dir.join(&spec.file);
    info!(stage = %spec.name, path = %path.display(), "loading map");
    let text = fs::read_to_string(&path).map_err(|source| LevelLoadError::Io { path, source })?;
    Level::from_map(spec.name.clone(), &text, &spec.spawns, config)
}

pub fn load_default(config: &Config) -> Result<Level, LevelLoadError> {
    Level::from_map(DEFAULT_LEVEL_NAME, DEFAULT_MAP, &LEVEL_1_SPAWNS, config)
}
