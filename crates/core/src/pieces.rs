//! Pieces module - tetromino templates and wall kick data
//!
//! Every piece lives in a 4x4 grid of booleans (`shape[row][col]`, row 0 on top). Rotation
//! happens inside the top-left 3x3 frame for J, L, Z, S and T, and inside the full 4x4 frame
//! for I and O. See [`crate::rotation`] for the rotation itself.

use crate::types::{PieceKind, RotateDirection, Rotation, SPAWN_X};

/// Occupancy grid of a piece, indexed `[row][col]`
pub type Shape = [[bool; 4]; 4];

const X: bool = true;
const O: bool = false;

const I_SHAPE: Shape = [[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]];
const O_SHAPE: Shape = [[O, O, O, O], [O, X, X, O], [O, X, X, O], [O, O, O, O]];
const J_SHAPE: Shape = [[X, O, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]];
const L_SHAPE: Shape = [[O, O, X, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]];
const Z_SHAPE: Shape = [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]];
const S_SHAPE: Shape = [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]];
const T_SHAPE: Shape = [[O, X, O, O], [X, X, X, O], [O, O, O, O], [O, O, O, O]];

/// Spawn orientation template for a piece kind
pub fn template(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
    }
}

/// Side length of the square a piece rotates inside
pub fn frame_size(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I | PieceKind::O => 4,
        _ => 3,
    }
}

/// Spawn row; the I piece starts one row higher so its bar sits on row 0
pub fn spawn_y(kind: PieceKind) -> i8 {
    match kind {
        PieceKind::I => -1,
        _ => 0,
    }
}

/// A falling piece: kind, current shape and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
    /// Set when the piece came out of (or was dealt because of) a hold
    pub was_held: bool,
}

impl Tetromino {
    /// A fresh piece of `kind` at its spawn position
    pub fn pick(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: template(kind),
            x: SPAWN_X,
            y: spawn_y(kind),
            rotation: Rotation::North,
            was_held: false,
        }
    }

    /// The same piece translated to `(x, y)`
    pub fn at(&self, x: i8, y: i8) -> Self {
        Self { x, y, ..*self }
    }

    /// Board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells_at(self.x, self.y)
    }

    /// Occupied cells as if the piece stood at `(x, y)`
    pub fn cells_at(&self, x: i8, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.iter().enumerate().flat_map(move |(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(col, _)| (x + col as i8, y + row as i8))
        })
    }
}

/// Kick offsets `(dx, dy)` per transition, five candidates each, y pointing down
pub type KickTable = [[(i8, i8); 5]; 8];

/// Kicks shared by J, L, Z, S, T (and O, whose rotation never moves a cell)
pub const NORMAL_KICKS: KickTable = [
    // 0 -> 1
    [(-1, 0), (-1, 1), (0, -2), (-1, -2), (0, 0)],
    // 1 -> 0
    [(1, 0), (0, 1), (1, -1), (0, 2), (1, 2)],
    // 1 -> 2
    [(1, 0), (0, 1), (1, -1), (0, 2), (1, 2)],
    // 2 -> 1
    [(-1, 0), (-1, 1), (0, -2), (-1, -2), (0, 0)],
    // 2 -> 3
    [(1, 0), (0, 1), (1, 1), (0, -2), (1, -2)],
    // 3 -> 2
    [(-1, 0), (-1, -1), (0, 2), (-1, 2), (1, 0)],
    // 3 -> 0
    [(-1, 0), (0, 1), (-1, -1), (0, 2), (-1, 2)],
    // 0 -> 3
    [(1, 0), (1, 1), (0, -2), (1, -2), (0, 0)],
];

/// Kicks for the I piece
pub const I_KICKS: KickTable = [
    // 0 -> 1
    [(-2, 0), (1, 0), (-2, -1), (1, 2), (0, -2)],
    // 1 -> 0
    [(2, 0), (-1, 0), (2, 1), (-1, -2), (0, 0)],
    // 1 -> 2
    [(-1, 0), (2, 0), (-1, 2), (2, -1), (0, 0)],
    // 2 -> 1
    [(1, 0), (-2, 0), (1, -2), (-2, 1), (0, -2)],
    // 2 -> 3
    [(2, 0), (-1, 0), (2, 1), (-1, -2), (0, -2)],
    // 3 -> 2
    [(-2, 0), (1, 0), (-2, -1), (1, 2), (0, 0)],
    // 3 -> 0
    [(1, 0), (-2, 0), (1, -2), (-2, 1), (0, 0)],
    // 0 -> 3
    [(-1, 0), (2, 0), (-1, 2), (2, -1), (0, -2)],
];

pub fn kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &NORMAL_KICKS,
    }
}

/// Row of the kick table for a rotation starting at `from`
pub fn transition_id(direction: RotateDirection, from: Rotation) -> usize {
    use RotateDirection::{Clockwise as Cw, CounterClockwise as Ccw};

    match (direction, from) {
        (Cw, Rotation::North) => 0,
        (Ccw, Rotation::East) => 1,
        (Cw, Rotation::East) => 2,
        (Ccw, Rotation::South) => 3,
        (Cw, Rotation::South) => 4,
        (Ccw, Rotation::West) => 5,
        (Cw, Rotation::West) => 6,
        (Ccw, Rotation::North) => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(shape: &Shape) -> usize {
        shape.iter().flatten().filter(|&&c| c).count()
    }

    #[test]
    fn every_template_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(count(&template(kind)), 4, "{:?}", kind);
        }
    }

    #[test]
    fn three_wide_templates_fit_their_frame() {
        for kind in PieceKind::ALL {
            let size = frame_size(kind);
            let shape = template(kind);
            for (row, cols) in shape.iter().enumerate() {
                for (col, &filled) in cols.iter().enumerate() {
                    if filled {
                        assert!(row < size && col < size, "{:?} at ({}, {})", kind, col, row);
                    }
                }
            }
        }
    }

    #[test]
    fn pick_uses_spawn_position() {
        let i = Tetromino::pick(PieceKind::I);
        assert_eq!((i.x, i.y), (3, -1));
        assert_eq!(i.rotation, Rotation::North);
        assert!(!i.was_held);

        let t = Tetromino::pick(PieceKind::T);
        assert_eq!((t.x, t.y), (3, 0));
    }

    #[test]
    fn cells_are_translated_by_position() {
        let t = Tetromino::pick(PieceKind::T).at(5, 10);
        let mut cells: Vec<_> = t.cells().collect();
        cells.sort();
        assert_eq!(cells, vec![(5, 11), (6, 10), (6, 11), (7, 11)]);
    }

    #[test]
    fn transition_ids_cover_all_rows_once() {
        let mut seen = [false; 8];
        for dir in [RotateDirection::Clockwise, RotateDirection::CounterClockwise] {
            for rot in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
                let id = transition_id(dir, rot);
                assert!(!seen[id]);
                seen[id] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn kick_rows_match_transitions() {
        assert_eq!(
            NORMAL_KICKS[transition_id(RotateDirection::CounterClockwise, Rotation::West)],
            [(-1, 0), (-1, -1), (0, 2), (-1, 2), (1, 0)]
        );
        assert_eq!(
            I_KICKS[transition_id(RotateDirection::Clockwise, Rotation::North)],
            [(-2, 0), (1, 0), (-2, -1), (1, 2), (0, -2)]
        );
        assert!(std::ptr::eq(kick_table(PieceKind::O), &NORMAL_KICKS));
        assert!(std::ptr::eq(kick_table(PieceKind::I), &I_KICKS));
    }
}
