//! Render pass: snapshot in, draw calls out
//!
//! This module is pure. It reads a [`SessionSnapshot`] and issues draw requests to a
//! [`RenderSurface`]; presenting the frame is up to the caller.
//!
//! Coordinates are logical cells. One board cell is one unit, the whole screen is
//! [`SCREEN_WIDTH`] x [`SCREEN_HEIGHT`]:
//!
//! ```text
//!  0      7          17 19         29 30
//!  | panel| board P1  |  | board P2 |panel|
//! ```

use std::fmt;

use crate::pieces::template;
use crate::round::RoundPhase;
use crate::session::{MainMenuEntry, OptionsEntry, Screen};
use crate::snapshot::{RoundSnapshot, SessionSnapshot};
use crate::types::{PieceKind, PlayerId, BOARD_HEIGHT, BOARD_WIDTH};

pub const SCREEN_WIDTH: i16 = 36;
pub const SCREEN_HEIGHT: i16 = 22;

/// Tile colour of the ghost piece
pub const GHOST_COLOR: u8 = 9;
/// Colour of board frames and menu text highlights
pub const FRAME_COLOR: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Logo,
    /// Menu selection marker
    Cursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Large,
    Small,
}

pub trait RenderSurface {
    fn draw_sprite(&mut self, sprite: Sprite, x: i16, y: i16);

    /// Solid `w` x `h` block of colour `color` (a cell value, or one of the extra colours)
    fn draw_tile(&mut self, color: u8, x: i16, y: i16, w: i16, h: i16);

    fn draw_line(&mut self, color: u8, x0: i16, y0: i16, x1: i16, y1: i16);

    fn draw_text(&mut self, font: Font, x: i16, y: i16, args: fmt::Arguments<'_>);
}

/// Where one player's board and side panel go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundLayout {
    pub board_x: i16,
    pub board_y: i16,
    pub panel_x: i16,
}

impl RoundLayout {
    pub fn for_player(player: PlayerId) -> Self {
        match player {
            PlayerId::One => Self {
                board_x: 7,
                board_y: 1,
                panel_x: 0,
            },
            PlayerId::Two => Self {
                board_x: 19,
                board_y: 1,
                panel_x: 30,
            },
        }
    }

    fn center_x(&self) -> i16 {
        self.board_x + BOARD_WIDTH as i16 / 2
    }

    fn center_y(&self) -> i16 {
        self.board_y + BOARD_HEIGHT as i16 / 2
    }
}

/// Draw the whole frame
pub fn draw_session<S: RenderSurface>(snap: &SessionSnapshot, surface: &mut S) {
    match snap.screen {
        Screen::PressStart => {
            surface.draw_sprite(Sprite::Logo, 10, 4);
            surface.draw_text(Font::Large, 12, 14, format_args!("PRESS START"));
        }
        Screen::MainMenu => draw_main_menu(snap, surface),
        Screen::Options => draw_options(snap, surface),
        Screen::Marathon => {
            draw_round(&snap.rounds[0], RoundLayout::for_player(PlayerId::One), surface);
            let layout = RoundLayout::for_player(PlayerId::Two);
            if snap.started[1] {
                draw_round(&snap.rounds[1], layout, surface);
            } else {
                draw_board_frame(layout, surface);
                centered(surface, Font::Small, layout, 0, format_args!("PRESS START"));
            }
        }
        Screen::Versus => draw_versus(snap, surface),
    }
}

fn draw_main_menu<S: RenderSurface>(snap: &SessionSnapshot, surface: &mut S) {
    surface.draw_sprite(Sprite::Logo, 10, 2);
    for (i, entry) in MainMenuEntry::ALL.iter().enumerate() {
        let y = 12 + 2 * i as i16;
        if i == snap.selected {
            surface.draw_sprite(Sprite::Cursor, 11, y);
        }
        surface.draw_text(Font::Large, 13, y, format_args!("{}", entry.label()));
    }
}

fn draw_options<S: RenderSurface>(snap: &SessionSnapshot, surface: &mut S) {
    surface.draw_text(Font::Large, 14, 3, format_args!("OPTIONS"));
    let config = &snap.config;
    for (i, entry) in OptionsEntry::ALL.iter().enumerate() {
        let y = 8 + 2 * i as i16;
        if i == snap.selected {
            surface.draw_sprite(Sprite::Cursor, 8, y);
        }
        match entry {
            OptionsEntry::RandomBag => {
                let state = if config.random_bag { "On" } else { "Off" };
                surface.draw_text(Font::Large, 10, y, format_args!("Random Bag: {}", state));
            }
            OptionsEntry::SfxVolume => {
                surface.draw_text(
                    Font::Large,
                    10,
                    y,
                    format_args!("SFX Volume: {}", config.sfx_volume),
                );
            }
            OptionsEntry::MusicVolume => {
                surface.draw_text(
                    Font::Large,
                    10,
                    y,
                    format_args!("Music Volume: {}", config.music_volume),
                );
            }
        }
    }
}

fn draw_versus<S: RenderSurface>(snap: &SessionSnapshot, surface: &mut S) {
    let both = snap.started[0] && snap.started[1];
    for player in PlayerId::ALL {
        let i = player.index();
        let layout = RoundLayout::for_player(player);
        if !snap.started[i] {
            draw_board_frame(layout, surface);
            centered(surface, Font::Small, layout, 0, format_args!("PRESS START"));
            continue;
        }
        if both {
            draw_round(&snap.rounds[i], layout, surface);
        } else {
            draw_board_frame(layout, surface);
            centered(surface, Font::Small, layout, 0, format_args!("WAITING"));
        }
    }

    if let Some(winner) = snap.winner {
        let number = winner.index() + 1;
        surface.draw_text(Font::Large, 11, 9, format_args!("PLAYER {} WINS!", number));
        surface.draw_text(Font::Small, 13, 11, format_args!("Press Start"));
    }
}

fn draw_board_frame<S: RenderSurface>(layout: RoundLayout, surface: &mut S) {
    let (x0, y0) = (layout.board_x - 1, layout.board_y - 1);
    let (x1, y1) = (
        layout.board_x + BOARD_WIDTH as i16,
        layout.board_y + BOARD_HEIGHT as i16,
    );
    surface.draw_line(FRAME_COLOR, x0, y0, x1, y0);
    surface.draw_line(FRAME_COLOR, x0, y1, x1, y1);
    surface.draw_line(FRAME_COLOR, x0, y0, x0, y1);
    surface.draw_line(FRAME_COLOR, x1, y0, x1, y1);
}

/// Board, pieces, side panel and the phase overlay of one round
pub fn draw_round<S: RenderSurface>(round: &RoundSnapshot, layout: RoundLayout, surface: &mut S) {
    draw_board_frame(layout, surface);

    for (y, row) in round.board.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell != 0 {
                let (tx, ty) = (layout.board_x + x as i16, layout.board_y + y as i16);
                surface.draw_tile(cell, tx, ty, 1, 1);
            }
        }
    }

    if let Some(active) = round.active {
        let (bx, by) = (layout.board_x, layout.board_y);
        if let Some(ghost_y) = round.ghost_y.filter(|&g| g != active.y) {
            for (x, y) in active.cells_at_row(ghost_y).filter(|&(_, y)| y >= 0) {
                surface.draw_tile(GHOST_COLOR, bx + x as i16, by + y as i16, 1, 1);
            }
        }
        for (x, y) in active.cells_at_row(active.y).filter(|&(_, y)| y >= 0) {
            surface.draw_tile(active.kind.id(), bx + x as i16, by + y as i16, 1, 1);
        }
    }

    draw_panel(round, layout, surface);
    draw_phase(round, layout, surface);
}

fn draw_panel<S: RenderSurface>(round: &RoundSnapshot, layout: RoundLayout, surface: &mut S) {
    let x = layout.panel_x;
    surface.draw_text(Font::Small, x, 1, format_args!("HOLD"));
    if let Some(kind) = round.hold {
        draw_mini(kind, x, 2, surface);
    }

    surface.draw_text(Font::Small, x, 5, format_args!("NEXT"));
    for (i, kind) in round.next.iter().enumerate() {
        if let Some(kind) = *kind {
            draw_mini(kind, x, 6 + 3 * i as i16, surface);
        }
    }

    surface.draw_text(Font::Small, x, 15, format_args!("SCORE"));
    surface.draw_text(Font::Small, x, 16, format_args!("{}", round.score));
    surface.draw_text(Font::Small, x, 17, format_args!("LEVEL"));
    surface.draw_text(Font::Small, x, 18, format_args!("{}", round.level));
    surface.draw_text(Font::Small, x, 19, format_args!("LINES"));
    surface.draw_text(Font::Small, x, 20, format_args!("{}", round.lines));
}

/// Spawn shape of `kind` with its top-left at `(x, y)`
fn draw_mini<S: RenderSurface>(kind: PieceKind, x: i16, y: i16, surface: &mut S) {
    let shape = template(kind);
    for (row, cols) in shape.iter().enumerate() {
        for (col, &filled) in cols.iter().enumerate() {
            if filled {
                surface.draw_tile(kind.id(), x + col as i16, y + row as i16, 1, 1);
            }
        }
    }
}

fn draw_phase<S: RenderSurface>(round: &RoundSnapshot, layout: RoundLayout, surface: &mut S) {
    match round.phase {
        RoundPhase::Active => {}
        RoundPhase::Paused => centered(surface, Font::Large, layout, 0, format_args!("PAUSED")),
        RoundPhase::Resuming { .. } => {
            if let Some(secs) = round.phase.countdown_seconds() {
                centered(surface, Font::Large, layout, 0, format_args!("{}", secs));
            }
        }
        RoundPhase::GameOver { .. } | RoundPhase::Terminal => {
            centered(surface, Font::Large, layout, 0, format_args!("GAME OVER"));
        }
        RoundPhase::ContinuePrompt { .. } => {
            centered(surface, Font::Large, layout, -1, format_args!("CONTINUE?"));
            if let Some(secs) = round.phase.countdown_seconds() {
                centered(surface, Font::Large, layout, 1, format_args!("{}", secs));
            }
        }
    }
}

/// Text anchored on the middle of a board, `dy` rows off centre
fn centered<S: RenderSurface>(
    surface: &mut S,
    font: Font,
    layout: RoundLayout,
    dy: i16,
    args: fmt::Arguments<'_>,
) {
    surface.draw_text(font, layout.center_x() - 3, layout.center_y() + dy, args);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        tiles: Vec<(u8, i16, i16)>,
        texts: Vec<String>,
        sprites: Vec<Sprite>,
        lines: usize,
    }

    impl RenderSurface for Recording {
        fn draw_sprite(&mut self, sprite: Sprite, _x: i16, _y: i16) {
            self.sprites.push(sprite);
        }

        fn draw_tile(&mut self, color: u8, x: i16, y: i16, _w: i16, _h: i16) {
            self.tiles.push((color, x, y));
        }

        fn draw_line(&mut self, _color: u8, _x0: i16, _y0: i16, _x1: i16, _y1: i16) {
            self.lines += 1;
        }

        fn draw_text(&mut self, _font: Font, _x: i16, _y: i16, args: fmt::Arguments<'_>) {
            self.texts.push(args.to_string());
        }
    }

    #[test]
    fn title_shows_logo_and_prompt() {
        let mut rec = Recording::default();
        draw_session(&SessionSnapshot::new(), &mut rec);
        assert_eq!(rec.sprites, vec![Sprite::Logo]);
        assert_eq!(rec.texts, vec!["PRESS START".to_string()]);
    }

    #[test]
    fn board_cells_map_to_layout() {
        let mut snap = SessionSnapshot::new();
        snap.screen = Screen::Marathon;
        snap.started = [true, false];
        snap.rounds[0].phase = RoundPhase::Active;
        snap.rounds[0].board[19][0] = 8;

        let mut rec = Recording::default();
        draw_session(&snap, &mut rec);
        assert!(rec.tiles.contains(&(8, 7, 20)));
        // P2 has not joined
        assert!(rec.texts.iter().any(|t| t == "PRESS START"));
        // two board frames
        assert_eq!(rec.lines, 8);
    }

    #[test]
    fn continue_prompt_shows_seconds() {
        let mut round = RoundSnapshot::new(PlayerId::One);
        round.phase = RoundPhase::ContinuePrompt { frames_left: 590 };
        let mut rec = Recording::default();
        draw_round(&round, RoundLayout::for_player(PlayerId::One), &mut rec);
        assert!(rec.texts.iter().any(|t| t == "CONTINUE?"));
        assert!(rec.texts.iter().any(|t| t == "10"));
    }

    #[test]
    fn winner_banner() {
        let mut snap = SessionSnapshot::new();
        snap.screen = Screen::Versus;
        snap.started = [true, true];
        snap.winner = Some(PlayerId::Two);
        let mut rec = Recording::default();
        draw_session(&snap, &mut rec);
        assert!(rec.texts.iter().any(|t| t == "PLAYER 2 WINS!"));
    }
}
