use crossterm::style::Color;

use crate::actor::ActorKind;

/// Images the core asks the front end to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Pacman { mouth_open: bool },
    Ghost(ActorKind),
    SmallPellet,
    LargePellet,
    Strawberry,
}

/// Drawing surface in world units. The core never touches pixels itself.
pub trait Canvas {
    fn size(&self) -> (i32, i32);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);
    /// `(x, y)` is the sprite's top-left corner.
    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);
}

/// Draws `text` horizontally centered on the canvas at height `y`.
pub fn draw_centered(canvas: &mut dyn Canvas, text: &str, y: i32, color: Color) {
    let (w, _) = canvas.size();
    let text_w = text.chars().count() as i32 * crate::TILE_SIZE / 2;
    canvas.draw_text(text, (w - text_w).max(0) / 2, y, color);
}
