//! Piece tests - templates, rotation and wall kicks

use tetrade::core::board::Board;
use tetrade::core::pieces::{kick_table, I_KICKS, NORMAL_KICKS};
use tetrade::core::{template, transition_id, try_rotate, Tetromino};
use tetrade::types::{PieceKind, RotateDirection, Rotation};

use RotateDirection::{Clockwise as Cw, CounterClockwise as Ccw};

#[test]
fn test_every_template_has_four_cells() {
    for kind in PieceKind::ALL {
        let count = template(kind).iter().flatten().filter(|&&c| c).count();
        assert_eq!(count, 4, "{:?}", kind);
    }
}

#[test]
fn test_spawn_positions() {
    for kind in PieceKind::ALL {
        let piece = Tetromino::pick(kind);
        assert_eq!(piece.x, 3);
        assert_eq!(piece.rotation, Rotation::North);
        assert!(!piece.was_held);
        // every piece shows its top row on row 0 of the board
        let top = piece.cells().map(|(_, y)| y).min().unwrap();
        let expected = if kind == PieceKind::O { 1 } else { 0 };
        assert_eq!(top, expected, "{:?}", kind);
    }
}

#[test]
fn test_four_turns_restore_every_piece() {
    let board = Board::new();
    for direction in [Cw, Ccw] {
        for kind in PieceKind::ALL {
            let start = Tetromino::pick(kind).at(3, 8);
            let mut piece = start;
            for _ in 0..4 {
                piece = try_rotate(&piece, direction, &board).unwrap();
                assert_eq!(piece.cells().count(), 4);
            }
            assert_eq!(piece, start, "{:?} {:?}", kind, direction);
        }
    }
}

#[test]
fn test_rotation_state_follows_direction() {
    let board = Board::new();
    let t = Tetromino::pick(PieceKind::T).at(4, 8);

    let east = try_rotate(&t, Cw, &board).unwrap();
    assert_eq!(east.rotation, Rotation::East);
    let west = try_rotate(&t, Ccw, &board).unwrap();
    assert_eq!(west.rotation, Rotation::West);
    let south = try_rotate(&east, Cw, &board).unwrap();
    assert_eq!(south.rotation, Rotation::South);
}

#[test]
fn test_i_piece_kicks_off_the_ceiling() {
    let board = Board::new();
    let spawn = Tetromino::pick(PieceKind::I);
    assert_eq!((spawn.x, spawn.y), (3, -1));

    // upright at (3, -1) would poke above the board; the fourth kick (1, 2) is the first fit
    let east = try_rotate(&spawn, Cw, &board).unwrap();
    assert_eq!((east.x, east.y), (4, 1));
    assert_eq!(east.rotation, Rotation::East);

    let mut piece = east;
    for expected in [Rotation::South, Rotation::West, Rotation::North] {
        piece = try_rotate(&piece, Cw, &board).unwrap();
        assert_eq!(piece.rotation, expected);
        assert_eq!((piece.x, piece.y), (4, 1));
    }
    assert_eq!(piece.shape, template(PieceKind::I));
}

#[test]
fn test_t_kicks_off_the_left_wall() {
    let board = Board::new();
    let east = try_rotate(&Tetromino::pick(PieceKind::T).at(4, 8), Cw, &board).unwrap();
    // the East T keeps column 0 of its frame empty, so it can stand at x = -1
    let against_wall = east.at(-1, 8);
    assert!(board.is_valid_placement(-1, 8, &against_wall));

    let south = try_rotate(&against_wall, Cw, &board).unwrap();
    assert_eq!(south.rotation, Rotation::South);
    assert_eq!((south.x, south.y), (0, 8));
}

#[test]
fn test_rotation_fails_when_every_kick_is_blocked() {
    let piece = Tetromino::pick(PieceKind::T).at(3, 8);
    let mut board = Board::new();
    for y in 0..20 {
        for x in 0..10 {
            board.set(x, y, 8);
        }
    }
    for (x, y) in piece.cells() {
        board.set(x, y, 0);
    }

    assert!(board.is_valid_placement(3, 8, &piece));
    assert_eq!(try_rotate(&piece, Cw, &board), None);
    assert_eq!(try_rotate(&piece, Ccw, &board), None);
}

#[test]
fn test_rotation_prefers_unmoved_position() {
    let mut board = Board::new();
    // a block right of the frame does not matter while the turned piece fits in place
    board.set(7, 9, 8);
    let piece = Tetromino::pick(PieceKind::J).at(3, 8);
    let rotated = try_rotate(&piece, Cw, &board).unwrap();
    assert_eq!((rotated.x, rotated.y), (3, 8));
}

#[test]
fn test_transition_ids() {
    let cases = [
        (Cw, Rotation::North, 0),
        (Ccw, Rotation::East, 1),
        (Cw, Rotation::East, 2),
        (Ccw, Rotation::South, 3),
        (Cw, Rotation::South, 4),
        (Ccw, Rotation::West, 5),
        (Cw, Rotation::West, 6),
        (Ccw, Rotation::North, 7),
    ];
    for (direction, from, id) in cases {
        assert_eq!(transition_id(direction, from), id, "{:?} from {:?}", direction, from);
    }
}

#[test]
fn test_kick_tables_by_kind() {
    assert_eq!(kick_table(PieceKind::I), &I_KICKS);
    for kind in PieceKind::ALL.into_iter().filter(|&k| k != PieceKind::I) {
        assert_eq!(kick_table(kind), &NORMAL_KICKS);
    }
    assert_eq!(I_KICKS[0][3], (1, 2));
    assert_eq!(NORMAL_KICKS[2][0], (1, 0));
}
