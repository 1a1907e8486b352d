//! Pieces tests - shapes and pure piece geometry

use std::collections::HashSet;

use tomino::core::{get_shape, Piece};
use tomino::types::{PieceType, Position};

fn position_set(piece: &Piece) -> HashSet<Position> {
    piece.blocks().iter().map(|b| b.position()).collect()
}

#[test]
fn test_all_shapes_have_four_distinct_cells() {
    for piece_type in PieceType::ALL {
        let shape = get_shape(piece_type);
        let cells: HashSet<_> = shape.iter().copied().collect();
        assert_eq!(cells.len(), 4, "{:?}", piece_type);
        assert!(
            shape.iter().all(|&(row, column)| row >= 0 && column >= 0),
            "{:?}",
            piece_type
        );
    }
}

#[test]
fn test_piece_blocks_carry_type() {
    for piece_type in PieceType::ALL {
        let piece = Piece::of(piece_type);
        assert!(piece.blocks().iter().all(|b| b.piece_type() == piece_type));
    }
}

#[test]
fn test_i_piece_shape() {
    let piece = Piece::of(PieceType::I);
    assert_eq!(piece.width(), 4);
    assert_eq!(piece.top(), 0);
    assert_eq!(piece.blocks()[0].position(), Position::new(0, 1));
}

#[test]
fn test_piece_moves() {
    let mut piece = Piece::of(PieceType::L);
    let start = piece.positions();

    piece.move_right();
    piece.move_right();
    piece.move_down();
    piece.move_left();

    for (moved, original) in piece.positions().iter().zip(start.iter()) {
        assert_eq!(*moved, original.offset(-1, 1));
    }
}

#[test]
fn test_rotation_keeps_pivot() {
    for piece_type in PieceType::ALL {
        let mut piece = Piece::of(piece_type);
        let pivot = piece.blocks()[0].position();
        piece.rotate();
        assert_eq!(piece.blocks()[0].position(), pivot, "{:?}", piece_type);
    }
}

#[test]
fn test_four_rotations_are_identity() {
    for piece_type in PieceType::ALL {
        let mut piece = Piece::of(piece_type);
        let start = piece.positions();
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(piece.positions(), start, "{:?}", piece_type);
    }
}

#[test]
fn test_rotation_of_i_is_vertical() {
    let mut piece = Piece::of(PieceType::I);
    piece.rotate();

    assert_eq!(piece.width(), 1);
    let expected: HashSet<_> = [
        Position::new(1, 1),
        Position::new(0, 1),
        Position::new(-1, 1),
        Position::new(-2, 1),
    ]
    .into_iter()
    .collect();
    assert_eq!(position_set(&piece), expected);
}

#[test]
fn test_square_rotation_disabled() {
    let mut piece = Piece::of(PieceType::O);
    assert!(!piece.can_rotate());

    let before = piece.positions();
    piece.rotate();
    assert_eq!(piece.positions(), before);
}

#[test]
fn test_restore_snapshot() {
    let mut piece = Piece::of(PieceType::Z);
    let saved = piece.positions();

    piece.rotate();
    piece.move_right();
    assert_ne!(piece.positions(), saved);

    piece.restore(&saved);
    assert_eq!(piece.positions(), saved);
}
