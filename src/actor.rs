use crossterm::style::Color;
use rand::Rng;

use crate::render::Sprite;
use crate::strategy::{Behavior, MovementStrategy, Surroundings};
use crate::{Point, TILE_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Pacman,
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl ActorKind {
    pub fn is_player(self) -> bool {
        self == ActorKind::Pacman
    }

    /// Movement policy each character starts a level with.
    pub fn default_behavior(self, frame_rate: u32) -> Behavior {
        match self {
            ActorKind::Pacman => Behavior::PlayerControlled,
            ActorKind::Blinky => Behavior::Aggressive,
            ActorKind::Pinky => Behavior::Ambush,
            ActorKind::Inky => Behavior::Fearful,
            ActorKind::Clyde => Behavior::random(frame_rate),
        }
    }

    pub fn color(self) -> Color {
        match self {
            ActorKind::Pacman => Color::Yellow,
            ActorKind::Blinky => Color::Red,
            ActorKind::Pinky => Color::Magenta,
            ActorKind::Inky => Color::Cyan,
            ActorKind::Clyde => Color::Rgb {
                r: 250,
                g: 100,
                b: 0,
            },
        }
    }
}

/// A moving character. Its position lives in its strategy.
#[derive(Clone, Debug)]
pub struct Actor {
    kind: ActorKind,
    strategy: MovementStrategy,
    spawn: Point,
    frames_per_image: u32,
    frames_since_swap: u32,
    mouth_open: bool,
}

impl Actor {
    pub fn new(kind: ActorKind, spawn: Point, speed: i32, frame_rate: u32) -> Self {
        Self {
            kind,
            strategy: MovementStrategy::new(spawn, speed, kind.default_behavior(frame_rate)),
            spawn,
            frames_per_image: (frame_rate / 2).max(1),
            frames_since_swap: 0,
            mouth_open: false,
        }
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.strategy.position()
    }

    pub fn strategy(&self) -> &MovementStrategy {
        &self.strategy
    }

    pub fn set_strategy(&mut self, strategy: MovementStrategy) {
        self.strategy = strategy;
    }

    pub fn advance(&mut self, around: &Surroundings<'_>, rng: &mut impl Rng) {
        self.strategy.advance(around, rng);
        if self.kind.is_player() {
            self.frames_since_swap += 1;
            if self.frames_since_swap >= self.frames_per_image {
                self.mouth_open = !self.mouth_open;
                self.frames_since_swap = 0;
            }
        }
    }

    pub fn respawn(&mut self) {
        self.strategy.reset(self.spawn);
        self.frames_since_swap = 0;
        self.mouth_open = false;
    }

    /// Whether `other` lies inside this actor's half-tile window.
    pub fn overlaps(&self, other: Point) -> bool {
        let here = self.position();
        let half = TILE_SIZE / 2;
        (here.x - other.x).abs() < half && (here.y - other.y).abs() < half
    }

    pub fn sprite(&self) -> Sprite {
        match self.kind {
            ActorKind::Pacman => Sprite::Pacman {
                mouth_open: self.mouth_open,
            },
            ghost => Sprite::Ghost(ghost),
        }
    }

    pub fn draw_origin(&self) -> Point {
        let p = self.position();
        Point::new(p.x - TILE_SIZE / 2, p.y - TILE_SIZE / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;
    use rand::rngs::mock::StepRng;

    #[test]
    fn roster_behaviors() {
        assert_eq!(ActorKind::Pacman.default_behavior(30), Behavior::PlayerControlled);
        assert_eq!(ActorKind::Blinky.default_behavior(30), Behavior::Aggressive);
        assert_eq!(ActorKind::Pinky.default_behavior(30), Behavior::Ambush);
        assert_eq!(ActorKind::Inky.default_behavior(30), Behavior::Fearful);
        assert_eq!(ActorKind::Clyde.default_behavior(30), Behavior::random(30));
    }

    #[test]
    fn mouth_toggles_every_half_second() {
        let maze = Maze::parse("000\n010\n000").unwrap();
        let spawn = Point::tile_center(1, 1);
        let mut pac = Actor::new(ActorKind::Pacman, spawn, 5, 4);
        let around = Surroundings {
            maze: &maze,
            player: spawn,
            input: None,
        };
        let mut rng = StepRng::new(0, 0);
        pac.advance(&around, &mut rng);
        assert_eq!(pac.sprite(), Sprite::Pacman { mouth_open: false });
        pac.advance(&around, &mut rng);
        assert_eq!(pac.sprite(), Sprite::Pacman { mouth_open: true });
        pac.respawn();
        assert_eq!(pac.sprite(), Sprite::Pacman { mouth_open: false });
    }

    #[test]
    fn strategy_swaps_only_when_asked() {
        let spawn = Point::tile_center(1, 1);
        let mut ghost = Actor::new(ActorKind::Blinky, spawn, 5, 30);
        assert_eq!(*ghost.strategy().behavior(), Behavior::Aggressive);
        ghost.set_strategy(MovementStrategy::new(spawn, 3, Behavior::Fearful));
        assert_eq!(*ghost.strategy().behavior(), Behavior::Fearful);
        assert_eq!(ghost.strategy().speed(), 3);
    }

    #[test]
    fn overlap_window_is_half_a_tile() {
        let ghost = Actor::new(ActorKind::Inky, Point::new(100, 100), 5, 30);
        assert!(ghost.overlaps(Point::new(111, 89)));
        assert!(!ghost.overlaps(Point::new(112, 100)));
        assert!(!ghost.overlaps(Point::new(100, 88)));
    }
}
