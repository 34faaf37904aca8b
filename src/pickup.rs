use crate::maze::{Maze, OBSTACLE};
use crate::render::Sprite;
use crate::{Point, PICKUP_RADIUS, TILE_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickupKind {
    Small,
    Large,
    Fruit,
}

impl PickupKind {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            OBSTACLE => None,
            'P' => Some(PickupKind::Large),
            'F' => Some(PickupKind::Fruit),
            _ => Some(PickupKind::Small),
        }
    }

    pub fn value(self) -> u32 {
        match self {
            PickupKind::Small => 10,
            PickupKind::Large => 50,
            PickupKind::Fruit => 200,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pickup {
    pub pos: Point,
    pub kind: PickupKind,
}

impl Pickup {
    /// Dots sit on the tile center. A fruit is an image, so its position is
    /// the image's top-left corner.
    pub fn at_tile(kind: PickupKind, col: usize, row: usize) -> Self {
        let center = Point::tile_center(col, row);
        let pos = match kind {
            PickupKind::Fruit => Point::new(center.x - TILE_SIZE / 2, center.y - TILE_SIZE / 2),
            _ => center,
        };
        Self { pos, kind }
    }

    pub fn value(&self) -> u32 {
        self.kind.value()
    }

    /// Whether the player at `player` is close enough to take this pickup.
    /// Fruit checks against a window shifted half a tile right and down on
    /// all edges but the right one.
    pub fn is_reached_by(&self, player: Point) -> bool {
        let dx = player.x - self.pos.x;
        let dy = player.y - self.pos.y;
        match self.kind {
            PickupKind::Fruit => {
                let half = TILE_SIZE / 2;
                dx < PICKUP_RADIUS
                    && dx - half > -PICKUP_RADIUS
                    && (dy - half).abs() < PICKUP_RADIUS
            }
            _ => dx.abs() < PICKUP_RADIUS && dy.abs() < PICKUP_RADIUS,
        }
    }

    pub fn draw_origin(&self) -> Point {
        match self.kind {
            PickupKind::Fruit => self.pos,
            _ => Point::new(self.pos.x - TILE_SIZE / 2, self.pos.y - TILE_SIZE / 2),
        }
    }

    pub fn sprite(&self) -> Sprite {
        match self.kind {
            PickupKind::Small => Sprite::SmallPellet,
            PickupKind::Large => Sprite::LargePellet,
            PickupKind::Fruit => Sprite::Strawberry,
        }
    }
}

/// One pickup on every walkable tile, kind picked by the tile symbol.
pub fn spawn_all(maze: &Maze) -> Vec<Pickup> {
    maze.tiles()
        .filter_map(|(col, row, symbol)| {
            PickupKind::from_symbol(symbol).map(|kind| Pickup::at_tile(kind, col, row))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_select_kind() {
        let maze = Maze::parse("0P0\n0F0\n0.0").unwrap();
        let pickups = spawn_all(&maze);
        let kinds: Vec<_> = pickups.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![PickupKind::Large, PickupKind::Fruit, PickupKind::Small]
        );
        assert_eq!(pickups[0].pos, Point::new(36, 12));
        assert_eq!(pickups[1].pos, Point::new(24, 24));
        assert_eq!(pickups[2].pos, Point::new(36, 60));
    }

    #[test]
    fn dot_window_is_open_on_the_boundary() {
        let dot = Pickup::at_tile(PickupKind::Small, 1, 1);
        assert!(dot.is_reached_by(dot.pos));
        assert!(dot.is_reached_by(Point::new(dot.pos.x + 9, dot.pos.y - 9)));
        assert!(!dot.is_reached_by(Point::new(dot.pos.x + 10, dot.pos.y)));
        assert!(!dot.is_reached_by(Point::new(dot.pos.x, dot.pos.y - 10)));
    }

    #[test]
    fn fruit_window_is_shifted() {
        let fruit = Pickup::at_tile(PickupKind::Fruit, 1, 1);
        let center = Point::tile_center(1, 1);
        // x must satisfy center - 10 < x < center - 2
        assert!(!fruit.is_reached_by(center));
        assert!(fruit.is_reached_by(Point::new(center.x - 3, center.y)));
        assert!(fruit.is_reached_by(Point::new(center.x - 9, center.y + 9)));
        assert!(!fruit.is_reached_by(Point::new(center.x - 10, center.y)));
        assert!(!fruit.is_reached_by(Point::new(center.x - 3, center.y + 10)));
    }

    #[test]
    fn values_per_kind() {
        assert_eq!(PickupKind::Small.value(), 10);
        assert_eq!(PickupKind::Large.value(), 50);
        assert_eq!(PickupKind::Fruit.value(), 200);
    }
}
