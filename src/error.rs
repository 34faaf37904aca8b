use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::actor::ActorKind;

#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("failed to read map file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("map is empty")]
    Empty,
    #[error("map is not rectangular: row {row} has {found} tiles, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("a level needs exactly one player, found {0}")]
    PlayerCount(usize),
    #[error("{kind:?} spawns inside a wall at column {col}, row {row}")]
    SpawnBlocked {
        kind: ActorKind,
        col: usize,
        row: usize,
    },
}
