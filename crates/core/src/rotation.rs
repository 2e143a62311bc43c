//! Rotation with wall kicks
//!
//! A rotation first turns the shape inside its frame, then tries the unmoved position and
//! the five kick offsets for the transition, in order. The first position that fits wins.
//! If none fits the piece is left untouched.

use crate::board::Board;
use crate::pieces::{frame_size, kick_table, transition_id, Shape, Tetromino};
use crate::types::RotateDirection;

/// Rotate the top-left `size` x `size` frame of a shape by a quarter turn
///
/// Clockwise is a transpose followed by reversing each row; counter-clockwise is a transpose
/// followed by reversing each column. Cells outside the frame stay empty.
pub fn rotate_shape(shape: &Shape, size: usize, direction: RotateDirection) -> Shape {
    let mut out = [[false; 4]; 4];
    for row in 0..size {
        for col in 0..size {
            out[row][col] = match direction {
                RotateDirection::Clockwise => shape[size - 1 - col][row],
                RotateDirection::CounterClockwise => shape[col][size - 1 - row],
            };
        }
    }
    out
}

/// Try to rotate `piece` on `board`
///
/// Returns the rotated piece (shape, rotation state and possibly a kicked position), or
/// `None` when neither the unmoved position nor any of the five kicks fits.
pub fn try_rotate(piece: &Tetromino, direction: RotateDirection, board: &Board) -> Option<Tetromino> {
    let mut rotated = *piece;
    rotated.shape = rotate_shape(&piece.shape, frame_size(piece.kind), direction);
    rotated.rotation = piece.rotation.rotate(direction);

    if board.is_valid_placement(piece.x, piece.y, &rotated) {
        return Some(rotated);
    }

    let kicks = &kick_table(piece.kind)[transition_id(direction, piece.rotation)];
    kicks.iter().find_map(|&(dx, dy)| {
        let (x, y) = (piece.x + dx, piece.y + dy);
        board
            .is_valid_placement(x, y, &rotated)
            .then(|| rotated.at(x, y))
    })
}
