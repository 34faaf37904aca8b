#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use crossterm::style::Color;
use pacman_arcade::render::{Canvas, Sprite};

/// Canvas double that remembers every draw call.
pub struct RecordingCanvas {
    pub width: i32,
    pub height: i32,
    pub rects: Vec<(i32, i32, i32, i32, Color)>,
    pub sprites: Vec<(Sprite, i32, i32)>,
    pub texts: Vec<String>,
}

impl RecordingCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            rects: Vec::new(),
            sprites: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.rects.push((x, y, w, h, color));
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32) {
        self.sprites.push((sprite, x, y));
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _color: Color) {
        self.texts.push(text.to_string());
    }
}

/// Writes map files into a fresh directory under the system temp dir.
pub fn map_dir(test: &str, maps: &[(&str, &str)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pacman_arcade_{}_{}", std::process::id(), test));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    for (name, text) in maps {
        fs::write(dir.join(name), text).unwrap();
    }
    dir
}
