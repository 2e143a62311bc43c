//! Board module - the 10x20 matrix of locked cells
//!
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Cell values follow [`crate::types::Cell`]: 0 empty, 1..=7 a locked piece, 8 garbage.

use crate::pieces::Tetromino;
use crate::rng::SimpleRng;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL, GARBAGE_CELL};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;

/// Garbage gaps are drawn from the leftmost `GARBAGE_GAP_RANGE` columns
pub const GARBAGE_GAP_RANGE: u32 = 8;

/// Row-major `u8` copy of the board, used by snapshots
pub type BoardGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        self.get(x, y) == Some(EMPTY_CELL)
    }

    /// Whether `piece` fits with its origin at `(x, y)`
    ///
    /// False as soon as one occupied cell of the piece lands outside the board or on a
    /// non-empty cell.
    pub fn is_valid_placement(&self, x: i8, y: i8, piece: &Tetromino) -> bool {
        piece.cells_at(x, y).all(|(cx, cy)| self.is_open(cx, cy))
    }

    /// Write the piece id into every cell it covers
    ///
    /// Cells outside the board are dropped. No validity check is made: a piece may be placed
    /// over the top edge, which is how a top out is recorded.
    pub fn place(&mut self, piece: &Tetromino) {
        let id = piece.kind.id();
        for (x, y) in piece.cells() {
            self.set(x, y, id);
        }
    }

    /// Lowest row the piece can fall to from its current position
    pub fn landing_y(&self, piece: &Tetromino) -> i8 {
        let mut y = piece.y;
        while self.is_valid_placement(piece.x, y + 1, piece) {
            y += 1;
        }
        y
    }

    /// Rows the piece would fall before resting
    pub fn drop_distance(&self, piece: &Tetromino) -> u32 {
        (self.landing_y(piece) - piece.y) as u32
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH]
            .iter()
            .all(|&cell| cell != EMPTY_CELL)
    }

    /// Remove row `y`, shifting every row above it down by one and emptying row 0
    pub fn clear_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * WIDTH, WIDTH);
        self.cells[..WIDTH].fill(EMPTY_CELL);
    }

    /// Remove every full row, scanning from the top, and return how many were removed
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared += 1;
            }
        }
        cleared
    }

    /// Push a garbage row in from the bottom
    ///
    /// Everything moves up one row and the old top row is lost. The new bottom row is
    /// garbage except for one empty gap, whose column is returned.
    pub fn add_garbage_row(&mut self, rng: &mut SimpleRng) -> u8 {
        self.cells.copy_within(WIDTH.., 0);
        let bottom = BOARD_SIZE - WIDTH;
        self.cells[bottom..].fill(GARBAGE_CELL);
        let gap = rng.next_range(GARBAGE_GAP_RANGE) as u8;
        self.cells[bottom + gap as usize] = EMPTY_CELL;
        gap
    }

    /// Advance the game-over sweep by one step (two cells)
    ///
    /// Non-empty cells under the cursor turn gray. Does nothing once the cursor has passed
    /// the top row.
    pub fn sweep_step(&mut self, cursor: &mut SweepCursor) {
        if cursor.is_finished() {
            return;
        }
        for x in [cursor.col, cursor.col + 1] {
            if let Some(cell) = self.get(x, cursor.row) {
                if cell != EMPTY_CELL {
                    self.set(x, cursor.row, GARBAGE_CELL);
                }
            }
        }
        cursor.advance();
    }

    /// Copy the board into a row-major grid
    pub fn write_u8_grid(&self, out: &mut BoardGrid) {
        for (row, chunk) in out.iter_mut().zip(self.cells.chunks_exact(WIDTH)) {
            row.copy_from_slice(chunk);
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the whole board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Build a board from rows written as strings, bottom-aligned
    ///
    /// `.` is empty, a digit is that cell value, `#` is garbage. Rows shorter than the board
    /// width are padded with empty cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let top = BOARD_HEIGHT as usize - rows.len().min(BOARD_HEIGHT as usize);
        for (i, row) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            for (x, ch) in row.chars().take(WIDTH).enumerate() {
                let cell = match ch {
                    '#' => GARBAGE_CELL,
                    c => c.to_digit(10).map(|d| d as Cell).unwrap_or(EMPTY_CELL),
                };
                board.cells[(top + i) * WIDTH + x] = cell;
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of the game-over sweep: starts at the bottom-left, walks right two cells at a
/// time and then up a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepCursor {
    pub row: i8,
    pub col: i8,
}

impl SweepCursor {
    pub fn new() -> Self {
        Self {
            row: BOARD_HEIGHT as i8 - 1,
            col: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.row < 0
    }

    fn advance(&mut self) {
        self.col += 2;
        if self.col >= BOARD_WIDTH as i8 - 1 {
            self.col = 0;
            self.row -= 1;
        }
    }
}

impl Default for SweepCursor {
    fn default() -> Self {
        Self::new()
    }
}
