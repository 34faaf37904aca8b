use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::actor::ActorKind;
use crate::render::{Canvas, Sprite};
use crate::{Point, TILE_SIZE};

pub const CELL_W: usize = 2;
/// World units covered by one terminal column.
const COLUMN_UNITS: i32 = TILE_SIZE / CELL_W as i32;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Empty,
    Fill,
    Sprite(Sprite),
    Text([char; CELL_W]),
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

/// Canvas backed by a tile-sized cell buffer. Frames are composed in memory
/// and only the cells that changed since the last frame are written out.
pub struct TerminalCanvas {
    cols: usize,
    rows: usize,
    frame: Vec<Cell>,
    last: Vec<Cell>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl TerminalCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        let mut canvas = Self {
            cols: 0,
            rows: 0,
            frame: Vec::new(),
            last: Vec::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 0,
        };
        canvas.resize(width, height);
        canvas
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        let cols = (width.max(0) / TILE_SIZE) as usize;
        let rows = (height.max(0) / TILE_SIZE) as usize;
        if cols == self.cols && rows == self.rows {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.frame = vec![BLANK; cols * rows];
        self.last = vec![BLANK; cols * rows];
        self.needs_full = true;
    }

    /// Terminal cell (column, row) to world coordinates, if it is on the canvas.
    pub fn to_world(&self, column: u16, row: u16) -> Option<Point> {
        let col = column.checked_sub(self.origin_x)? as usize;
        let row = row.checked_sub(self.origin_y)? as usize;
        if col >= self.cols * CELL_W || row >= self.rows {
            return None;
        }
        Some(Point::new(
            col as i32 * COLUMN_UNITS,
            row as i32 * TILE_SIZE + TILE_SIZE / 2,
        ))
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        self.frame.get_mut(row as usize * self.cols + col as usize)
    }

    /// Writes the composed frame to `out` and starts a new blank one.
    /// `term_size` is the terminal's (columns, rows).
    pub fn present(&mut self, out: &mut impl Write, term_size: (u16, u16)) -> io::Result<()> {
        let needed_w = (self.cols * CELL_W) as u16;
        let needed_h = self.rows as u16;
        let (term_w, term_h) = term_size;

        if term_w < needed_w || term_h < needed_h {
            out.queue(MoveTo(0, 0))?;
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            out.flush()?;
            self.needs_full = true;
            self.frame.fill(BLANK);
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        for idx in 0..self.frame.len() {
            let cell = self.frame[idx];
            if self.needs_full || cell != self.last[idx] {
                self.draw_cell(out, idx % self.cols, idx / self.cols, cell)?;
            }
        }
        self.needs_full = false;
        std::mem::swap(&mut self.frame, &mut self.last);
        self.frame.fill(BLANK);

        out.flush()
    }

    fn draw_cell(&self, out: &mut impl Write, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text: String = match cell.glyph {
            Glyph::Empty => "  ".to_string(),
            Glyph::Fill if cell.color == Color::Black => "  ".to_string(),
            Glyph::Fill => "██".to_string(),
            Glyph::Sprite(sprite) => sprite_text(sprite).to_string(),
            Glyph::Text(chars) => chars.iter().collect(),
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(&text))?;
        let w = UnicodeWidthStr::width(text.as_str());
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

fn sprite_text(sprite: Sprite) -> &'static str {
    match sprite {
        Sprite::Pacman { mouth_open: true } => "😃",
        Sprite::Pacman { mouth_open: false } => "🙂",
        Sprite::Ghost(_) => "👻",
        Sprite::SmallPellet => "· ",
        Sprite::LargePellet => "● ",
        Sprite::Strawberry => "🍓",
    }
}

fn sprite_color(sprite: Sprite) -> Color {
    match sprite {
        Sprite::Pacman { .. } => ActorKind::Pacman.color(),
        Sprite::Ghost(kind) => kind.color(),
        Sprite::SmallPellet => Color::White,
        Sprite::LargePellet => Color::Magenta,
        Sprite::Strawberry => Color::Red,
    }
}

impl Canvas for TerminalCanvas {
    fn size(&self) -> (i32, i32) {
        (self.cols as i32 * TILE_SIZE, self.rows as i32 * TILE_SIZE)
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (c0, r0) = (x.div_euclid(TILE_SIZE), y.div_euclid(TILE_SIZE));
        let (c1, r1) = ((x + w - 1).div_euclid(TILE_SIZE), (y + h - 1).div_euclid(TILE_SIZE));
        for row in r0..=r1 {
            for col in c0..=c1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell {
                        glyph: Glyph::Fill,
                        color,
                    };
                }
            }
        }
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32) {
        let col = (x + TILE_SIZE / 2).div_euclid(TILE_SIZE);
        let row = (y + TILE_SIZE / 2).div_euclid(TILE_SIZE);
        if let Some(cell) = self.cell_mut(col, row) {
            *cell = Cell {
                glyph: Glyph::Sprite(sprite),
                color: sprite_color(sprite),
            };
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let row = y.div_euclid(TILE_SIZE);
        let start = x.div_euclid(COLUMN_UNITS);
        for (i, ch) in text.chars().enumerate() {
            let column = start + i as i32;
            let half = column.rem_euclid(CELL_W as i32) as usize;
            if let Some(cell) = self.cell_mut(column.div_euclid(CELL_W as i32), row) {
                let mut chars = match cell.glyph {
                    Glyph::Text(chars) => chars,
                    _ => [' '; CELL_W],
                };
                chars[half] = ch;
                *cell = Cell {
                    glyph: Glyph::Text(chars),
                    color,
                };
            }
        }
    }
}
