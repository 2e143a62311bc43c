//! Read-only views of the game handed to the render pass
//!
//! Snapshots are plain `Copy` data so a front-end can keep one around and refill it every
//! frame without allocating.

use crate::board::BoardGrid;
use crate::config::Config;
use crate::pieces::{Shape, Tetromino};
use crate::round::RoundPhase;
use crate::session::Screen;
use crate::types::{PieceKind, PlayerId, Rotation, BOARD_HEIGHT, BOARD_WIDTH, NEXT_PREVIEW};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Board cells covered with the piece moved to row `y`
    pub fn cells_at_row(&self, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        let x = self.x;
        self.shape.iter().enumerate().flat_map(move |(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(col, _)| (x + col as i8, y + row as i8))
        })
    }
}

impl From<&Tetromino> for ActiveSnapshot {
    fn from(value: &Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub player: PlayerId,
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next: [Option<PieceKind>; NEXT_PREVIEW],
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub phase: RoundPhase,
    /// Linked to an opponent
    pub versus: bool,
}

impl RoundSnapshot {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next: [None; NEXT_PREVIEW],
            score: 0,
            level: 0,
            lines: 0,
            phase: RoundPhase::starting(),
            versus: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub screen: Screen,
    /// Highlighted entry of the main or options menu
    pub selected: usize,
    pub config: Config,
    pub rounds: [RoundSnapshot; 2],
    pub started: [bool; 2],
    pub winner: Option<PlayerId>,
}

impl SessionSnapshot {
    pub fn new() -> Self {
        Self {
            screen: Screen::PressStart,
            selected: 0,
            config: Config::default(),
            rounds: [
                RoundSnapshot::new(PlayerId::One),
                RoundSnapshot::new(PlayerId::Two),
            ],
            started: [false; 2],
            winner: None,
        }
    }

    pub fn round(&self, player: PlayerId) -> &RoundSnapshot {
        &self.rounds[player.index()]
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
