//! Piece providers - where new pieces come from
//!
//! The engine only asks for "the next piece"; the order is the provider's business.

use crate::pieces::Piece;
use crate::rng::PieceBag;
use crate::types::PieceType;

/// Source of new falling pieces
pub trait PieceProvider {
    /// Produce the next piece, in piece-local coordinates
    fn next_piece(&mut self) -> Piece;

    /// Type of the piece the next call will return, if known in advance
    fn preview(&self) -> Option<PieceType> {
        None
    }
}

impl<P: PieceProvider + ?Sized> PieceProvider for Box<P> {
    fn next_piece(&mut self) -> Piece {
        (**self).next_piece()
    }

    fn preview(&self) -> Option<PieceType> {
        (**self).preview()
    }
}

/// Seeded 7-bag provider
#[derive(Debug, Clone, Default)]
pub struct BagPieceProvider {
    bag: PieceBag,
}

impl BagPieceProvider {
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceBag::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }
}

impl PieceProvider for BagPieceProvider {
    fn next_piece(&mut self) -> Piece {
        Piece::of(self.bag.draw())
    }

    fn preview(&self) -> Option<PieceType> {
        Some(self.bag.peek())
    }
}

/// Cycles through a fixed list of pieces
#[derive(Debug, Clone)]
pub struct SequencePieceProvider {
    pieces: Vec<Piece>,
    index: usize,
}

impl SequencePieceProvider {
    /// Panics if `pieces` is empty.
    pub fn new(pieces: Vec<Piece>) -> Self {
        assert!(!pieces.is_empty(), "SequencePieceProvider needs at least one piece");
        Self { pieces, index: 0 }
    }

    pub fn from_types(types: &[PieceType]) -> Self {
        Self::new(types.iter().map(|&t| Piece::of(t)).collect())
    }

    /// Number of pieces handed out so far
    pub fn served(&self) -> usize {
        self.index
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> Piece {
        let piece = self.pieces[self.index % self.pieces.len()].clone();
        self.index += 1;
        piece
    }

    fn preview(&self) -> Option<PieceType> {
        Some(self.pieces[self.index % self.pieces.len()].piece_type())
    }
}
