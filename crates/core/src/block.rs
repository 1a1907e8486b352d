//! Block module - a single occupied cell

use crate::types::{PieceType, Position};

/// One occupied grid cell: a position plus the type of the piece it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    position: Position,
    piece_type: PieceType,
}

impl Block {
    pub fn new(position: Position, piece_type: PieceType) -> Self {
        Self {
            position,
            piece_type,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    /// Relocate relative to the current position
    pub fn move_by(&mut self, row: i32, column: i32) {
        self.position = self.position.offset(row, column);
    }

    /// Relocate to an absolute position
    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }
}
