pub mod actor;
pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod level;
pub mod maze;
pub mod pickup;
pub mod render;
pub mod state;
pub mod strategy;
pub mod terminal;

/// Side of one maze tile in world units. Actors are exactly one tile wide.
pub const TILE_SIZE: i32 = 24;
/// Half-width of the window inside which the player picks something up.
pub const PICKUP_RADIUS: i32 = 10;
pub const DEFAULT_FRAME_RATE: u32 = 30;
pub const DEFAULT_SPEED: i32 = 5;
/// Fastest legal step. Anything longer could carry an actor past a wall.
pub const MAX_SPEED: i32 = TILE_SIZE / 2 - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center of the tile at column `col`, row `row`.
    pub const fn tile_center(col: usize, row: usize) -> Self {
        Self {
            x: col as i32 * TILE_SIZE + TILE_SIZE / 2,
            y: row as i32 * TILE_SIZE + TILE_SIZE / 2,
        }
    }
}
