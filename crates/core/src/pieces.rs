//! Pieces module - piece shapes and the geometry shared by pieces and the board
//!
//! A [`Piece`] is a pure geometric container: it moves and rotates its blocks
//! without looking at any board. Collision checks, wall kicks and rollback are
//! the [`Board`](crate::Board)'s job.
//!
//! The free functions here operate on block slices so the board can apply the
//! same geometry to the falling piece that lives inside its own block list.

use arrayvec::ArrayVec;

use crate::block::Block;
use crate::types::{PieceType, Position, PIECE_BLOCKS};

/// Block positions captured before a rotation, indexed by block order.
pub type PositionSnapshot = ArrayVec<Position, PIECE_BLOCKS>;

/// Shape of a piece in piece-local `(row, column)` coordinates, row 0 at the bottom.
///
/// The first entry is the rotation pivot.
pub type PieceShape = [(i32, i32); PIECE_BLOCKS];

/// Get the spawn shape for a piece type
pub fn get_shape(piece_type: PieceType) -> PieceShape {
    match piece_type {
        PieceType::I => [(0, 1), (0, 0), (0, 2), (0, 3)],
        PieceType::J => [(0, 1), (1, 0), (0, 0), (0, 2)],
        PieceType::L => [(0, 1), (1, 2), (0, 0), (0, 2)],
        PieceType::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
        PieceType::S => [(0, 1), (0, 0), (1, 1), (1, 2)],
        PieceType::T => [(0, 1), (0, 0), (0, 2), (1, 1)],
        PieceType::Z => [(0, 1), (0, 2), (1, 0), (1, 1)],
    }
}

/// Whether rotating the piece type changes anything (the square does not)
pub fn can_rotate(piece_type: PieceType) -> bool {
    piece_type != PieceType::O
}

/// Number of columns spanned by the blocks (0 for no blocks)
pub fn width_of(blocks: &[Block]) -> i32 {
    let columns = blocks.iter().map(|b| b.position().column);
    match (columns.clone().min(), columns.max()) {
        (Some(min), Some(max)) => max - min + 1,
        _ => 0,
    }
}

/// Highest row occupied by the blocks (-1 for no blocks)
pub fn top_of(blocks: &[Block]) -> i32 {
    blocks
        .iter()
        .map(|b| b.position().row)
        .max()
        .unwrap_or(-1)
}

/// Move every block by the same offset
pub fn translate(blocks: &mut [Block], row: i32, column: i32) {
    for block in blocks {
        block.move_by(row, column);
    }
}

/// Rotate every block 90° around the first block.
///
/// Relative to the pivot, `(row, column) -> (-column, row)`.
pub fn rotate_about_first(blocks: &mut [Block]) {
    let Some(pivot) = blocks.first().map(Block::position) else {
        return;
    };

    for block in blocks {
        let row = block.position().row - pivot.row;
        let column = block.position().column - pivot.column;
        block.move_to(Position::new(pivot.row - column, pivot.column + row));
    }
}

/// Capture the current block positions
pub fn snapshot(blocks: &[Block]) -> PositionSnapshot {
    blocks
        .iter()
        .take(PIECE_BLOCKS)
        .map(Block::position)
        .collect()
}

/// Put every block back where the snapshot recorded it
pub fn restore(blocks: &mut [Block], snapshot: &[Position]) {
    for (block, &position) in blocks.iter_mut().zip(snapshot) {
        block.move_to(position);
    }
}

/// A piece that is not (yet) on a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    piece_type: PieceType,
    blocks: [Block; PIECE_BLOCKS],
    can_rotate: bool,
}

impl Piece {
    /// Create a piece from explicit positions. The first position is the pivot.
    pub fn new(piece_type: PieceType, positions: [Position; PIECE_BLOCKS], can_rotate: bool) -> Self {
        Self {
            piece_type,
            blocks: positions.map(|p| Block::new(p, piece_type)),
            can_rotate,
        }
    }

    /// Create the canonical piece of a type in local coordinates
    pub fn of(piece_type: PieceType) -> Self {
        let positions = get_shape(piece_type).map(Position::from);
        Self::new(piece_type, positions, can_rotate(piece_type))
    }

    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn can_rotate(&self) -> bool {
        self.can_rotate
    }

    pub fn width(&self) -> i32 {
        width_of(&self.blocks)
    }

    pub fn top(&self) -> i32 {
        top_of(&self.blocks)
    }

    pub fn move_by(&mut self, row: i32, column: i32) {
        translate(&mut self.blocks, row, column);
    }

    pub fn move_left(&mut self) {
        self.move_by(0, -1);
    }

    pub fn move_right(&mut self) {
        self.move_by(0, 1);
    }

    pub fn move_down(&mut self) {
        self.move_by(-1, 0);
    }

    /// Rotate in place around the first block (no-op when rotation is disabled)
    pub fn rotate(&mut self) {
        if self.can_rotate {
            rotate_about_first(&mut self.blocks);
        }
    }

    pub fn positions(&self) -> PositionSnapshot {
        snapshot(&self.blocks)
    }

    pub fn restore(&mut self, snapshot: &[Position]) {
        restore(&mut self.blocks, snapshot);
    }

    pub(crate) fn into_blocks(self) -> [Block; PIECE_BLOCKS] {
        self.blocks
    }
}

/// Read-only view of the piece currently falling on a board
#[derive(Debug, Clone, Copy)]
pub struct PieceView<'a> {
    piece_type: PieceType,
    can_rotate: bool,
    blocks: &'a [Block],
}

impl<'a> PieceView<'a> {
    pub(crate) fn new(piece_type: PieceType, can_rotate: bool, blocks: &'a [Block]) -> Self {
        Self {
            piece_type,
            can_rotate,
            blocks,
        }
    }

    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    pub fn blocks(&self) -> &'a [Block] {
        self.blocks
    }

    pub fn can_rotate(&self) -> bool {
        self.can_rotate
    }

    pub fn width(&self) -> i32 {
        width_of(self.blocks)
    }

    pub fn top(&self) -> i32 {
        top_of(self.blocks)
    }

    pub fn positions(&self) -> PositionSnapshot {
        snapshot(self.blocks)
    }
}
