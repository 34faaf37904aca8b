use crate::error::LevelLoadError;
use crate::TILE_SIZE;

/// Map symbol for a wall tile. Every other symbol is walkable.
pub const OBSTACLE: char = '0';

/// Rectangular tile grid, immutable once parsed.
#[derive(Clone, Debug)]
pub struct Maze {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Maze {
    /// Parses a map where every line feed ends a row. End of input also ends
    /// a row, so a final row without a terminator still counts; only the empty
    /// segment after a trailing line feed is dropped.
    pub fn parse(text: &str) -> Result<Self, LevelLoadError> {
        let mut lines: Vec<&str> = text.split('\n').collect();
        if lines.last().map_or(false, |l| l.is_empty()) {
            lines.pop();
        }

        let rows: Vec<Vec<char>> = lines
            .iter()
            .map(|line| line.strip_suffix('\r').unwrap_or(line).chars().collect())
            .collect();

        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(LevelLoadError::Empty),
        };
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(LevelLoadError::NotRectangular {
                row,
                expected: width,
                found,
            });
        }

        Ok(Self { rows, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn tile(&self, col: usize, row: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn is_wall_tile(&self, col: usize, row: usize) -> bool {
        self.tile(col, row).map_or(true, |c| c == OBSTACLE)
    }

    /// Whether the world coordinate lies on a wall. Anything outside the grid
    /// counts as a wall.
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return true;
        }
        self.is_wall_tile((x / TILE_SIZE) as usize, (y / TILE_SIZE) as usize)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, symbol)| (col, row, *symbol))
        })
    }
}
