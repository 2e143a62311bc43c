//! TermSurface: the core's draw calls on a character framebuffer.
//!
//! One logical cell is two terminal columns by one row, which roughly squares the board on
//! common terminal fonts. The logical screen is centred in the viewport.

use std::fmt;

use crate::core::render::{Font, RenderSurface, Sprite, FRAME_COLOR, GHOST_COLOR};
use crate::core::render::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::fb::{CellStyle, FrameBuffer, Rgb, BACKGROUND};

const CELL_W: i32 = 2;

const LOGO: [&str; 5] = [
    "▀█▀ █▀▀ ▀█▀ █▀█ ▄▀█ █▀▄ █▀▀",
    " █  █▀   █  █▀▄ █▀█ █ █ █▀ ",
    " ▀  ▀▀▀  ▀  ▀ ▀ ▀ ▀ ▀▀  ▀▀▀",
    "",
    "  marathon  /  versus",
];

/// Colour of a tile: board cell values `1..=8` and the extra render colours.
pub fn palette(color: u8) -> Rgb {
    match color {
        1 => Rgb::new(80, 220, 220),
        2 => Rgb::new(240, 220, 80),
        3 => Rgb::new(80, 120, 220),
        4 => Rgb::new(255, 165, 0),
        5 => Rgb::new(220, 80, 80),
        6 => Rgb::new(100, 220, 120),
        7 => Rgb::new(200, 120, 220),
        8 => Rgb::new(128, 128, 128),
        GHOST_COLOR => Rgb::new(70, 70, 80),
        FRAME_COLOR => Rgb::new(200, 200, 200),
        _ => BACKGROUND,
    }
}

/// Draws into a borrowed framebuffer for one frame.
pub struct TermSurface<'a> {
    fb: &'a mut FrameBuffer,
    origin_x: i32,
    origin_y: i32,
}

impl<'a> TermSurface<'a> {
    /// Clear `fb` and centre the logical screen in it.
    pub fn new(fb: &'a mut FrameBuffer) -> Self {
        fb.clear();
        let origin_x = (fb.width() as i32 - SCREEN_WIDTH as i32 * CELL_W).max(0) / 2;
        let origin_y = (fb.height() as i32 - SCREEN_HEIGHT as i32).max(0) / 2;
        Self {
            fb,
            origin_x,
            origin_y,
        }
    }

    fn column(&self, x: i16) -> i32 {
        self.origin_x + x as i32 * CELL_W
    }

    fn row(&self, y: i16) -> i32 {
        self.origin_y + y as i32
    }
}

impl RenderSurface for TermSurface<'_> {
    fn draw_sprite(&mut self, sprite: Sprite, x: i16, y: i16) {
        let (col, row) = (self.column(x), self.row(y));
        match sprite {
            Sprite::Logo => {
                let style = CellStyle::fg(palette(1)).bold();
                for (i, line) in LOGO.iter().enumerate() {
                    self.fb.put_str(col, row + i as i32, line, style);
                }
            }
            Sprite::Cursor => {
                self.fb.put_str(col, row, "▶", CellStyle::fg(palette(2)).bold());
            }
        }
    }

    fn draw_tile(&mut self, color: u8, x: i16, y: i16, w: i16, h: i16) {
        let style = CellStyle {
            fg: palette(color),
            bg: BACKGROUND,
            bold: false,
        };
        let ch = if color == GHOST_COLOR { '░' } else { '█' };
        let (col, row) = (self.column(x), self.row(y));
        self.fb.fill_rect(col, row, w as i32 * CELL_W, h as i32, ch, style);
    }

    /// Horizontal and vertical lines only
    fn draw_line(&mut self, color: u8, x0: i16, y0: i16, x1: i16, y1: i16) {
        let style = CellStyle::fg(palette(color));
        if y0 == y1 {
            let (a, b) = (self.column(x0.min(x1)), self.column(x0.max(x1)) + CELL_W - 1);
            let row = self.row(y0);
            for col in a..=b {
                self.fb.put_char(col, row, '─', style);
            }
        } else if x0 == x1 {
            // board frames sit on even cells left of a board and odd cells right of it
            let col = self.column(x0) + if x0 % 2 == 0 { CELL_W - 1 } else { 0 };
            let (top, bottom) = (self.row(y0.min(y1)), self.row(y0.max(y1)));
            for row in top..=bottom {
                self.fb.put_char(col, row, '│', style);
            }
        } else {
            log::warn!("diagonal line ({x0},{y0})-({x1},{y1}) not supported");
        }
    }

    fn draw_text(&mut self, font: Font, x: i16, y: i16, args: fmt::Arguments<'_>) {
        let style = match font {
            Font::Large => CellStyle::default().bold(),
            Font::Small => CellStyle::default(),
        };
        let (col, row) = (self.column(x), self.row(y));
        self.fb.put_fmt(col, row, args, style);
    }
}
