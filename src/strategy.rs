use rand::Rng;

use crate::maze::Maze;
use crate::{Point, MAX_SPEED, TILE_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// What a strategy may look at while choosing its next step.
#[derive(Clone, Copy)]
pub struct Surroundings<'a> {
    pub maze: &'a Maze,
    pub player: Point,
    pub input: Option<Direction>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    PlayerControlled,
    Aggressive,
    Fearful,
    Random {
        heading: Option<Direction>,
        frames: u32,
        interval: u32,
    },
    Ambush,
}

impl Behavior {
    /// Random wanderer that picks a new heading every `interval` frames.
    pub fn random(interval: u32) -> Self {
        Behavior::Random {
            heading: None,
            frames: 0,
            interval,
        }
    }

    fn reset(&mut self) {
        if let Behavior::Random {
            heading, frames, ..
        } = self
        {
            *heading = None;
            *frames = 0;
        }
    }
}

/// Movement policy of one actor. Owns the actor's position. Speed is kept in
/// `1..=MAX_SPEED` so a step can never skip over a wall.
#[derive(Clone, Debug)]
pub struct MovementStrategy {
    pos: Point,
    speed: i32,
    behavior: Behavior,
}

impl MovementStrategy {
    pub fn new(pos: Point, speed: i32, behavior: Behavior) -> Self {
        Self {
            pos,
            speed: speed.clamp(1, MAX_SPEED),
            behavior,
        }
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed.clamp(1, MAX_SPEED);
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Moves back to `pos` and forgets any per-behavior progress.
    pub fn reset(&mut self, pos: Point) {
        self.pos = pos;
        self.behavior.reset();
    }

    /// Whether one step towards `dir` keeps the actor's leading edge off a wall.
    pub fn can_move(&self, maze: &Maze, dir: Direction) -> bool {
        let reach = self.speed + TILE_SIZE / 2;
        let (dx, dy) = dir.delta();
        !maze.is_obstacle(self.pos.x + dx * reach, self.pos.y + dy * reach)
    }

    fn step(&mut self, dir: Direction) {
        let (dx, dy) = dir.delta();
        self.pos.x += dx * self.speed;
        self.pos.y += dy * self.speed;
    }

    fn try_step(&mut self, maze: &Maze, dir: Direction) -> bool {
        if self.can_move(maze, dir) {
            self.step(dir);
            true
        } else {
            false
        }
    }

    /// Advances one frame. An illegal move is skipped, never reported.
    pub fn advance(&mut self, around: &Surroundings<'_>, rng: &mut impl Rng) {
        match self.behavior {
            Behavior::PlayerControlled => {
                if let Some(dir) = around.input {
                    self.try_step(around.maze, dir);
                }
            }
            Behavior::Aggressive => self.chase(around),
            Behavior::Fearful => self.flee(around),
            Behavior::Random { .. } => self.wander(around.maze, rng),
            Behavior::Ambush => self.ambush(around, rng),
        }
    }

    // Greedy chase, x before y. A blocked axis falls through to the next
    // branch; with nothing legal the actor stalls for the frame.
    fn chase(&mut self, around: &Surroundings<'_>) {
        let maze = around.maze;
        let target = around.player;
        if self.pos.x > target.x && self.can_move(maze, Direction::Left) {
            self.step(Direction::Left);
        } else if self.pos.x < target.x && self.can_move(maze, Direction::Right) {
            self.step(Direction::Right);
        } else if self.pos.y > target.y && self.can_move(maze, Direction::Up) {
            self.step(Direction::Up);
        } else if self.pos.y < target.y && self.can_move(maze, Direction::Down) {
            self.step(Direction::Down);
        }
    }

    fn flee(&mut self, around: &Surroundings<'_>) {
        let maze = around.maze;
        let target = around.player;
        if self.pos.x > target.x && self.can_move(maze, Direction::Right) {
            self.step(Direction::Right);
        } else if self.pos.x < target.x && self.can_move(maze, Direction::Left) {
            self.step(Direction::Left);
        } else if self.pos.y > target.y && self.can_move(maze, Direction::Down) {
            self.step(Direction::Down);
        } else if self.pos.y < target.y && self.can_move(maze, Direction::Up) {
            self.step(Direction::Up);
        }
    }

    // Chase where the left and up branches only fire 40% of the time. The roll
    // happens before the position test, as in the plain chase order.
    fn ambush(&mut self, around: &Surroundings<'_>, rng: &mut impl Rng) {
        let maze = around.maze;
        let target = around.player;
        if rng.gen_range(0..10u32) < 4
            && self.pos.x > target.x
            && self.can_move(maze, Direction::Left)
        {
            self.step(Direction::Left);
        } else if self.pos.x < target.x && self.can_move(maze, Direction::Right) {
            self.step(Direction::Right);
        } else if rng.gen_range(0..10u32) < 4
            && self.pos.y > target.y
            && self.can_move(maze, Direction::Up)
        {
            self.step(Direction::Up);
        } else if self.pos.y < target.y && self.can_move(maze, Direction::Down) {
            self.step(Direction::Down);
        }
    }

    fn wander(&mut self, maze: &Maze, rng: &mut impl Rng) {
        let Behavior::Random {
            heading,
            frames,
            interval,
        } = self.behavior
        else {
            return;
        };

        let kept = frames < interval && heading.map_or(false, |dir| self.try_step(maze, dir));
        let (heading, frames) = if kept {
            (heading, frames)
        } else {
            (self.reroll(maze, rng).or(heading), 0)
        };
        self.behavior = Behavior::Random {
            heading,
            frames: frames + 1,
            interval,
        };
    }

    /// Independent weighted coin flips tried in a fixed order; the first one
    /// that lands on a legal move wins. The odds are not a clean categorical
    /// draw and are kept that way on purpose.
    fn reroll(&mut self, maze: &Maze, rng: &mut impl Rng) -> Option<Direction> {
        let dir = if rng.gen_range(0..10u32) < 4 && self.can_move(maze, Direction::Left) {
            Direction::Left
        } else if rng.gen_range(0..10u32) < 4 && self.can_move(maze, Direction::Right) {
            Direction::Right
        } else if rng.gen_range(0..10u32) < 6 && self.can_move(maze, Direction::Up) {
            Direction::Up
        } else if rng.gen_range(0..10u32) > 5 && self.can_move(maze, Direction::Down) {
            Direction::Down
        } else {
            return None;
        };
        self.step(dir);
        Some(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Every gen_range(0..10) draw yields 0.
    fn low_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    // Every gen_range(0..10) draw yields 9.
    fn high_rng() -> StepRng {
        StepRng::new(0xE666_6667, 0)
    }

    fn open_room() -> Maze {
        Maze::parse("00000\n01110\n01110\n01110\n00000").unwrap()
    }

    fn around(maze: &Maze, player: Point, input: Option<Direction>) -> Surroundings<'_> {
        Surroundings {
            maze,
            player,
            input,
        }
    }

    #[test]
    fn player_blocked_by_wall_above() {
        let maze = Maze::parse("0000\n0110\n0000").unwrap();
        let start = Point::tile_center(1, 1);
        let mut s = MovementStrategy::new(start, 5, Behavior::PlayerControlled);
        s.advance(&around(&maze, start, Some(Direction::Up)), &mut low_rng());
        assert_eq!(s.position(), start);
    }

    #[test]
    fn player_moves_along_open_corridor() {
        let maze = Maze::parse("0000\n0110\n0000").unwrap();
        let start = Point::tile_center(1, 1);
        let mut s = MovementStrategy::new(start, 5, Behavior::PlayerControlled);
        s.advance(&around(&maze, start, Some(Direction::Right)), &mut low_rng());
        assert_eq!(s.position(), Point::new(start.x + 5, start.y));
    }

    #[test]
    fn player_idles_without_input() {
        let maze = open_room();
        let start = Point::tile_center(2, 2);
        let mut s = MovementStrategy::new(start, 5, Behavior::PlayerControlled);
        s.advance(&around(&maze, start, None), &mut low_rng());
        assert_eq!(s.position(), start);
    }

    #[test]
    fn aggressive_prefers_horizontal() {
        let maze = open_room();
        let start = Point::tile_center(2, 2);
        let mut s = MovementStrategy::new(start, 5, Behavior::Aggressive);
        s.advance(&around(&maze, Point::tile_center(1, 1), None), &mut low_rng());
        assert_eq!(s.position(), Point::new(start.x - 5, start.y));
    }

    #[test]
    fn aggressive_falls_back_to_vertical() {
        let maze = Maze::parse("00000\n01010\n01110\n00000").unwrap();
        let start = Point::tile_center(3, 1);
        let mut s = MovementStrategy::new(start, 5, Behavior::Aggressive);
        let player = Point::tile_center(1, 2);
        s.advance(&around(&maze, player, None), &mut low_rng());
        assert_eq!(s.position(), Point::new(start.x, start.y + 5));
    }

    #[test]
    fn aggressive_stalls_against_wall() {
        let maze = Maze::parse("00000\n01010\n01110\n00000").unwrap();
        let start = Point::tile_center(3, 1);
        let mut s = MovementStrategy::new(start, 5, Behavior::Aggressive);
        let player = Point::tile_center(1, 1);
        s.advance(&around(&maze, player, None), &mut low_rng());
        assert_eq!(s.position(), start);
    }

    #[test]
    fn oversized_speed_cannot_cross_a_wall() {
        let maze = Maze::parse("00000\n01010\n00000").unwrap();
        let start = Point::tile_center(1, 1);
        let mut s = MovementStrategy::new(start, 30, Behavior::Aggressive);
        assert_eq!(s.speed(), MAX_SPEED);
        s.advance(&around(&maze, Point::tile_center(3, 1), None), &mut low_rng());
        assert_eq!(s.position(), start);
        assert!(!maze.is_obstacle(s.position().x, s.position().y));
    }

    #[test]
    fn speed_stays_positive() {
        let mut s = MovementStrategy::new(Point::tile_center(1, 1), 5, Behavior::Fearful);
        s.set_speed(-4);
        assert_eq!(s.speed(), 1);
        s.set_speed(40);
        assert_eq!(s.speed(), MAX_SPEED);
    }

    #[test]
    fn fearful_moves_away() {
        let maze = open_room();
        let start = Point::tile_center(2, 2);
        let mut s = MovementStrategy::new(start, 5, Behavior::Fearful);
        s.advance(&around(&maze, Point::tile_center(1, 2), None), &mut low_rng());
        assert_eq!(s.position(), Point::new(start.x + 5, start.y));
    }

    #[test]
    fn ambush_left_branch_suppressed_by_high_roll() {
        let maze = open_room();
        let start = Point::tile_center(2, 2);
        let player = Point::tile_center(1, 1);

        let mut gated = MovementStrategy::new(start, 5, Behavior::Ambush);
        gated.advance(&around(&maze, player, None), &mut high_rng());
        // Left and up both suppressed, right and down do not point at the player.
        assert_eq!(gated.position(), start);

        let mut open = MovementStrategy::new(start, 5, Behavior::Ambush);
        open.advance(&around(&maze, player, None), &mut low_rng());
        assert_eq!(open.position(), Point::new(start.x - 5, start.y));
    }

    #[test]
    fn random_first_branch_is_left() {
        let maze = open_room();
        let start = Point::tile_center(2, 2);
        let mut s = MovementStrategy::new(start, 5, Behavior::random(30));
        s.advance(&around(&maze, start, None), &mut low_rng());
        assert_eq!(s.position(), Point::new(start.x - 5, start.y));
        assert_eq!(
            *s.behavior(),
            Behavior::Random {
                heading: Some(Direction::Left),
                frames: 1,
                interval: 30
            }
        );
    }

    #[test]
    fn random_high_rolls_fall_through_to_down() {
        let maze = open_room();
        let start = Point::tile_center(2, 2);
        let mut s = MovementStrategy::new(start, 5, Behavior::random(30));
        s.advance(&around(&maze, start, None), &mut high_rng());
        assert_eq!(s.position(), Point::new(start.x, start.y + 5));
    }

    #[test]
    fn random_keeps_heading_until_interval() {
        let maze = open_room();
        let start = Point::tile_center(3, 2);
        let mut s = MovementStrategy::new(start, 2, Behavior::random(3));
        let mut rng = low_rng();
        s.advance(&around(&maze, start, None), &mut rng);
        s.advance(&around(&maze, start, None), &mut rng);
        s.advance(&around(&maze, start, None), &mut rng);
        assert_eq!(s.position(), Point::new(start.x - 6, start.y));
        match s.behavior() {
            Behavior::Random { frames, .. } => assert_eq!(*frames, 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn random_never_enters_walls() {
        let maze = Maze::parse(
            "0000000\n\
             0111110\n\
             0101010\n\
             0111110\n\
             0000000",
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let start = Point::tile_center(1, 1);
        let mut s = MovementStrategy::new(start, 5, Behavior::random(4));
        for _ in 0..2_000 {
            s.advance(&around(&maze, start, None), &mut rng);
            let p = s.position();
            assert!(!maze.is_obstacle(p.x, p.y), "entered a wall at {p:?}");
        }
    }

    #[test]
    fn reset_clears_random_progress() {
        let maze = open_room();
        let start = Point::tile_center(2, 2);
        let mut s = MovementStrategy::new(start, 5, Behavior::random(30));
        s.advance(&around(&maze, start, None), &mut low_rng());
        s.reset(start);
        assert_eq!(s.position(), start);
        assert_eq!(*s.behavior(), Behavior::random(30));
    }
}
