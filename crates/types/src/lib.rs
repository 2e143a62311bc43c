//! Shared types and constants
//!
//! Pure data definitions used by the core state machine, the terminal front-end and the
//! binary. Nothing here depends on I/O.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: x = 3, y = 0 (y = -1 for the I piece)
//!
//! # Frame Timing
//!
//! All timing is counted in frames of a 60 Hz loop:
//!
//! | Constant | Frames | Description |
//! |----------|--------|-------------|
//! | `BASE_DROP_RATE` | 30 | Gravity interval at level 0 |
//! | `SOFT_DROP_RATE` | 4 | Gravity interval while soft dropping |
//! | `SET_TIME` | 80 | Lock delay once a piece cannot fall |
//! | `MOVE_COOLDOWN` | 10 | Delay before held horizontal input repeats |
//! | `HORIZONTAL_REPEAT` | 3 | Repeat period of held horizontal input |
//! | `RESUME_FRAMES` | 180 | Countdown before a round (re)starts |
//! | `GAME_OVER_FRAMES` | 120 | Sweep animation time after a top out |
//! | `CONTINUE_FRAMES` | 600 | Time to accept the continue prompt |
//!
//! # Examples
//!
//! ```
//! use tetrade_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_id(7), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.id(), 7);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frames per second of the simulation loop
pub const FRAME_RATE: u32 = 60;

/// Gravity interval at level 0, in frames per row
pub const BASE_DROP_RATE: u32 = 30;

/// Per-level gravity multiplier (1.10) in 20.12 fixed point
pub const LEVEL_DROP_RATE_MULTI: i32 = 4506;

/// Gravity interval while the drop button is held
pub const SOFT_DROP_RATE: u32 = 4;

/// Lock delay, reset every time the piece falls a row
pub const SET_TIME: u32 = 80;

/// Frames before a held horizontal direction starts repeating
pub const MOVE_COOLDOWN: u32 = 10;

/// Held horizontal input repeats when `game_timer % HORIZONTAL_REPEAT == 0`
pub const HORIZONTAL_REPEAT: u32 = 3;

/// Countdown shown before a round starts or resumes (3 seconds)
pub const RESUME_FRAMES: u32 = 180;

/// Length of the game-over sweep before the round moves on (2 seconds)
pub const GAME_OVER_FRAMES: u32 = 120;

/// Time the continue prompt waits for an answer (10 seconds)
pub const CONTINUE_FRAMES: u32 = 600;

/// Spawn column of every piece
pub const SPAWN_X: i8 = 3;

/// Capacity of the next-piece queue (two bags)
pub const NEXT_QUEUE_LEN: usize = 14;

/// Number of distinct piece kinds
pub const PIECE_KIND_COUNT: usize = 7;

/// Number of upcoming pieces drawn beside the board
pub const NEXT_PREVIEW: usize = 3;

/// Line clear points per number of rows, multiplied by the level
///
/// - 1 line: 200
/// - 2 lines: 500
/// - 3 lines: 700
/// - 4 lines: 1000
pub const LINE_SCORES: [u32; 5] = [0, 200, 500, 700, 1000];

/// Points per row fallen while soft dropping
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row skipped by a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Weighted lines needed per level
pub const LEVEL_GOAL: u32 = 8;

/// Music playback rates, indexed by the highest level in play (clamped)
pub const MUSIC_SAMPLE_RATES: [u32; 10] = [
    22050, 23152, 24310, 25525, 26802, 28142, 29546, 31026, 32577, 34206,
];

/// Highest selectable volume setting
pub const MAX_VOLUME: u8 = 11;

/// Device volume for each setting `0..=MAX_VOLUME`
pub const VOLUME_TABLE: [u16; MAX_VOLUME as usize + 1] = [
    0x0000, 0x0666, 0x0CCC, 0x1332, 0x1999, 0x1FFF, 0x2665, 0x2CCC, 0x3332, 0x3998, 0x3FFF, 0x3FFF,
];

/// A cell on the board
///
/// - `0`: empty
/// - `1..=7`: locked piece, see [`PieceKind::id`]
/// - `8`: garbage, or a cell grayed out by the game-over sweep
pub type Cell = u8;

/// Empty board cell
pub const EMPTY_CELL: Cell = 0;

/// Garbage / locked-gray board cell
pub const GARBAGE_CELL: Cell = 8;

/// The seven tetromino piece kinds
///
/// Discriminants are the cell values written when a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I = 1,
    O = 2,
    J = 3,
    L = 4,
    Z = 5,
    S = 6,
    T = 7,
}

impl PieceKind {
    /// Every kind, in id order. This is also the unshuffled bag.
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Cell value of this kind (`1..=7`)
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Inverse of [`PieceKind::id`]
    ///
    /// ```
    /// use tetrade_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// assert_eq!(PieceKind::from_id(8), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::J),
            4 => Some(PieceKind::L),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::T => "t",
        }
    }
}

/// Direction of a rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotation states
///
/// - **North**: spawn orientation (state 0)
/// - **East**: one clockwise turn (state 1)
/// - **South**: two turns (state 2)
/// - **West**: one counter-clockwise turn (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// ```
    /// use tetrade_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// ```
    /// use tetrade_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotate(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Numeric rotation state `0..=3`
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Logical controller buttons
///
/// The core only knows these names; front-ends map physical keys onto them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Hard drop, menu up
    Up,
    /// Soft drop, menu down
    Down,
    Left,
    Right,
    /// Rotate counter-clockwise, menu select
    Confirm,
    /// Rotate clockwise, decline continue, menu back
    Cancel,
    /// Pause, join, accept continue
    Start,
    Hold,
    ShoulderL,
    ShoulderR,
}

impl Button {
    pub const COUNT: usize = 10;

    pub const ALL: [Button; Button::COUNT] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Confirm,
        Button::Cancel,
        Button::Start,
        Button::Hold,
        Button::ShoulderL,
        Button::ShoulderR,
    ];

    pub fn index(self) -> usize {
        match self {
            Button::Up => 0,
            Button::Down => 1,
            Button::Left => 2,
            Button::Right => 3,
            Button::Confirm => 4,
            Button::Cancel => 5,
            Button::Start => 6,
            Button::Hold => 7,
            Button::ShoulderL => 8,
            Button::ShoulderR => 9,
        }
    }
}

/// One of the two local players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// Audio samples the game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sample {
    /// Looping background theme
    Theme,
    /// Menu cursor, piece movement
    Click,
    Confirm,
    /// Rejected action
    Negative,
    Place,
    Hold,
    LineClear,
}

impl Sample {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sample::Theme => "theme",
            Sample::Click => "click",
            Sample::Confirm => "confirm",
            Sample::Negative => "negative",
            Sample::Place => "place",
            Sample::Hold => "hold",
            Sample::LineClear => "line_clear",
        }
    }
}
