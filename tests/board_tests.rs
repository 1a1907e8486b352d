//! Board tests - placement, movement, rotation with wall kicks, row clearing

use tomino::core::{Block, Board, Piece, WALL_KICK_OFFSETS};
use tomino::types::{PieceType, Position};

fn settle(board: &mut Board, row: i32, column: i32) {
    board.add_block(Block::new(Position::new(row, column), PieceType::I));
}

fn fill_row(board: &mut Board, row: i32, skip: Option<i32>) {
    for column in 0..board.width() {
        if Some(column) != skip {
            settle(board, row, column);
        }
    }
}

fn falling_positions(board: &Board) -> Vec<Position> {
    board.falling_piece().unwrap().positions().to_vec()
}

/// Vertical I: pivot second from the bottom
fn vertical_i() -> Piece {
    Piece::new(
        PieceType::I,
        [
            Position::new(1, 0),
            Position::new(0, 0),
            Position::new(2, 0),
            Position::new(3, 0),
        ],
        true,
    )
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(10, 20);
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);
    assert_eq!(board.top(), 19);
    assert!(board.blocks().is_empty());
    assert!(board.falling_piece().is_none());
    assert!(!board.has_collisions());
}

#[test]
fn test_board_collision_detection() {
    let mut board = Board::new(4, 4);
    settle(&mut board, 0, 0);
    assert!(!board.has_collisions());

    settle(&mut board, 0, 0);
    assert!(board.has_block_collisions());
    assert!(!board.has_board_collisions());

    let mut board = Board::new(4, 4);
    settle(&mut board, 4, 0);
    assert!(board.has_board_collisions());
    assert!(!board.has_block_collisions());

    for outside in [
        Position::new(-1, 0),
        Position::new(0, -1),
        Position::new(0, 4),
        Position::new(4, 3),
    ] {
        assert!(board.collides_with_board(&Block::new(outside, PieceType::T)));
    }
    assert!(!board.collides_with_board(&Block::new(Position::new(3, 3), PieceType::T)));
}

#[test]
fn test_add_places_every_type_at_top() {
    for piece_type in PieceType::ALL {
        let mut board = Board::new(10, 20);
        board.add(Piece::of(piece_type));

        let piece = board.falling_piece().unwrap();
        assert_eq!(piece.piece_type(), piece_type);
        assert_eq!(piece.top(), 19, "{:?}", piece_type);
        assert!(!board.has_collisions(), "{:?}", piece_type);
    }
}

#[test]
fn test_move_reversibility() {
    let mut board = Board::new(10, 20);
    board.add(Piece::of(PieceType::S));
    let start = falling_positions(&board);

    assert!(board.move_left());
    assert!(board.move_right());
    assert_eq!(falling_positions(&board), start);

    assert!(board.move_right());
    assert!(board.move_left());
    assert_eq!(falling_positions(&board), start);
}

#[test]
fn test_blocked_move_leaves_piece_untouched() {
    let mut board = Board::new(10, 20);
    board.add(Piece::of(PieceType::T));
    while board.move_left() {}

    let at_wall = falling_positions(&board);
    assert!(!board.move_left());
    assert_eq!(falling_positions(&board), at_wall);
    assert!(!board.has_collisions());
}

#[test]
fn test_move_down_stops_on_stack() {
    let mut board = Board::new(10, 20);
    settle(&mut board, 10, 4);
    board.add(Piece::of(PieceType::O));

    let rows = board.fall();
    assert_eq!(rows, 7);
    assert_eq!(
        board.falling_piece().unwrap().blocks().iter().map(|b| b.position().row).min(),
        Some(11)
    );
    assert!(!board.move_down());
}

#[test]
fn test_fall_zero_steps_when_resting() {
    let mut board = Board::new(4, 2);
    board.add(Piece::of(PieceType::O));

    let before = falling_positions(&board);
    assert_eq!(board.fall(), 0);
    assert_eq!(falling_positions(&board), before);
}

#[test]
fn test_rotation_cycle_on_small_board() {
    let mut board = Board::new(3, 3);
    board.add(Piece::new(
        PieceType::T,
        [
            Position::new(0, 1),
            Position::new(1, 1),
            Position::new(0, 0),
            Position::new(0, 2),
        ],
        true,
    ));

    let second = |board: &Board| board.falling_piece().unwrap().blocks()[1].position();
    assert_eq!(second(&board), Position::new(2, 1));

    let expected = [
        Position::new(1, 2),
        Position::new(0, 1),
        Position::new(1, 0),
        Position::new(2, 1),
    ];
    for position in expected {
        assert!(board.rotate());
        assert_eq!(second(&board), position);
        assert!(!board.has_collisions());
    }
}

#[test]
fn test_square_does_not_rotate() {
    let mut board = Board::new(10, 20);
    board.add(Piece::of(PieceType::O));
    let before = falling_positions(&board);

    assert!(!board.rotate());
    assert_eq!(falling_positions(&board), before);
}

#[test]
fn test_wall_kick_order() {
    assert_eq!(WALL_KICK_OFFSETS, [-1, -2, 1, 2]);
}

#[test]
fn test_wall_kick_left_at_right_wall() {
    let mut board = Board::new(10, 20);
    board.add(vertical_i());
    for _ in 0..4 {
        assert!(board.move_right());
    }
    assert_eq!(falling_positions(&board)[0], Position::new(17, 8));

    assert!(board.rotate());
    assert_eq!(
        falling_positions(&board),
        vec![
            Position::new(17, 7),
            Position::new(17, 6),
            Position::new(17, 8),
            Position::new(17, 9),
        ]
    );
}

#[test]
fn test_wall_kick_right_at_left_wall() {
    let mut board = Board::new(10, 20);
    board.add(vertical_i());
    for _ in 0..4 {
        assert!(board.move_left());
    }
    assert!(!board.move_left());

    assert!(board.rotate());
    assert_eq!(
        falling_positions(&board),
        vec![
            Position::new(17, 1),
            Position::new(17, 0),
            Position::new(17, 2),
            Position::new(17, 3),
        ]
    );
}

#[test]
fn test_failed_rotation_rolls_back() {
    let mut board = Board::new(10, 20);
    board.add(vertical_i());
    for _ in 0..4 {
        assert!(board.move_left());
    }
    settle(&mut board, 17, 1);
    let before = falling_positions(&board);
    let blocks_before = board.blocks().len();

    assert!(!board.rotate());
    assert_eq!(falling_positions(&board), before);
    assert_eq!(board.blocks().len(), blocks_before);
    assert!(!board.has_collisions());
}

#[test]
fn test_remove_single_full_row() {
    let mut board = Board::new(4, 6);
    fill_row(&mut board, 0, None);
    settle(&mut board, 1, 2);

    assert_eq!(board.remove_full_rows(), 1);
    assert_eq!(board.blocks().len(), 1);
    assert_eq!(board.blocks()[0].position(), Position::new(0, 2));
}

#[test]
fn test_remove_stacked_full_rows() {
    let mut board = Board::new(4, 8);
    fill_row(&mut board, 0, Some(1));
    fill_row(&mut board, 1, None);
    fill_row(&mut board, 2, None);
    fill_row(&mut board, 3, Some(3));
    fill_row(&mut board, 4, None);
    settle(&mut board, 5, 0);

    assert_eq!(board.remove_full_rows(), 3);
    assert_eq!(board.row_len(0), 3);
    assert_eq!(board.row_len(1), 3);
    assert_eq!(board.row_len(2), 1);
    assert_eq!(board.blocks().len(), 7);
    for row in 0..board.height() {
        assert!(board.row_len(row) < board.width() as usize);
    }
}

#[test]
fn test_remove_full_rows_none_full() {
    let mut board = Board::new(4, 4);
    fill_row(&mut board, 0, Some(0));
    let hash = board.state_hash();

    assert_eq!(board.remove_full_rows(), 0);
    assert_eq!(board.state_hash(), hash);
}

#[test]
fn test_state_hash_tracks_layout() {
    let mut a = Board::new(10, 20);
    let mut b = Board::new(10, 20);
    settle(&mut a, 0, 0);
    settle(&mut a, 3, 7);
    settle(&mut b, 3, 7);
    settle(&mut b, 0, 0);
    assert_eq!(a.state_hash(), b.state_hash());

    settle(&mut b, 5, 5);
    assert_ne!(a.state_hash(), b.state_hash());
}

#[test]
fn test_remove_all_blocks() {
    let mut board = Board::new(10, 20);
    fill_row(&mut board, 0, Some(2));
    board.add(Piece::of(PieceType::Z));

    board.remove_all_blocks();
    assert!(board.blocks().is_empty());
    assert!(board.falling_piece().is_none());
}
