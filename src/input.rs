use crossterm::event::KeyCode;

use crate::strategy::Direction;
use crate::Point;

/// Input gathered between two ticks. The three flags hold at most one event
/// each per tick and are dropped at the end of the tick whether or not the
/// current state used them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputLatch {
    pub key_pressed: bool,
    pub single_click: bool,
    pub double_click: bool,
    pub last_key: Option<KeyCode>,
    pub pointer: Option<Point>,
    pub screen_height: i32,
    pub held: Option<Direction>,
}

impl InputLatch {
    pub fn new(screen_height: i32) -> Self {
        Self {
            screen_height,
            ..Self::default()
        }
    }

    pub fn press(&mut self, code: KeyCode) {
        self.key_pressed = true;
        self.last_key = Some(code);
    }

    /// A click off the screen still counts as input; it just has no position.
    pub fn click(&mut self, at: Option<Point>) {
        self.single_click = true;
        self.pointer = at;
    }

    pub fn double_click(&mut self, at: Option<Point>) {
        self.double_click = true;
        self.pointer = at;
    }

    pub fn any(&self) -> bool {
        self.key_pressed || self.single_click || self.double_click
    }

    pub fn clear(&mut self) {
        self.key_pressed = false;
        self.single_click = false;
        self.double_click = false;
    }
}

/// Direction bound to a key: arrows, WASD and hjkl.
pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => Some(Direction::Right),
        _ => None,
    }
}

pub fn is_pause_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::F(1) | KeyCode::Char('p' | 'P'))
}
