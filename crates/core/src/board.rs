//! Board module - the grid and its movement rules
//!
//! The board owns every block on the grid, settled or falling, as an unordered
//! list. The falling piece is not a separate container: it is the tail of that
//! list, tracked by a marker, and every piece operation goes through the board.
//!
//! Coordinates: `(row, column)` with row 0 at the bottom and `height - 1` at the top.
//!
//! Collision state is never cached. It is evaluated on demand as two independent
//! checks (out of bounds, overlapping blocks); boards are small and the checks run
//! once per player action.

use std::collections::HashSet;

use crate::block::Block;
use crate::pieces::{self, Piece, PieceView};
use crate::types::{PieceType, Position};

/// Column offsets tried, in order, to salvage a colliding rotation
pub const WALL_KICK_OFFSETS: [i32; 4] = [-1, -2, 1, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Falling {
    start: usize,
    piece_type: PieceType,
    can_rotate: bool,
}

/// The game grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    blocks: Vec<Block>,
    falling: Option<Falling>,
}

impl Board {
    /// Create an empty board. Dimensions are fixed for the board's lifetime.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            blocks: Vec::with_capacity((width.max(0) * height.max(0)) as usize),
            falling: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Index of the top row
    pub fn top(&self) -> i32 {
        self.height - 1
    }

    /// All blocks on the board, settled and falling
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The piece currently falling, if any
    pub fn falling_piece(&self) -> Option<PieceView<'_>> {
        self.falling
            .map(|f| PieceView::new(f.piece_type, f.can_rotate, &self.blocks[f.start..]))
    }

    fn falling_blocks_mut(&mut self) -> &mut [Block] {
        match self.falling {
            Some(f) => &mut self.blocks[f.start..],
            None => &mut [],
        }
    }

    /// True if any block is out of bounds or two blocks overlap
    pub fn has_collisions(&self) -> bool {
        self.has_board_collisions() || self.has_block_collisions()
    }

    /// True if two blocks share a position
    pub fn has_block_collisions(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.blocks.len());
        !self.blocks.iter().all(|b| seen.insert(b.position()))
    }

    /// True if any block lies outside the grid
    pub fn has_board_collisions(&self) -> bool {
        self.blocks.iter().any(|b| self.collides_with_board(b))
    }

    pub fn collides_with_board(&self, block: &Block) -> bool {
        let Position { row, column } = block.position();
        row < 0 || row >= self.height || column < 0 || column >= self.width
    }

    /// Place a piece at the top of the board, horizontally centred, and make it
    /// the falling piece.
    ///
    /// A previously falling piece becomes settled. The caller is responsible for
    /// checking [`has_collisions`](Self::has_collisions) afterwards.
    pub fn add(&mut self, piece: Piece) {
        let offset_row = self.top() - piece.top();
        let offset_column = (self.width - piece.width()) / 2;

        let piece_type = piece.piece_type();
        let can_rotate = piece.can_rotate();
        let mut blocks = piece.into_blocks();
        pieces::translate(&mut blocks, offset_row, offset_column);

        self.falling = Some(Falling {
            start: self.blocks.len(),
            piece_type,
            can_rotate,
        });
        self.blocks.extend(blocks);
    }

    /// Add a settled block (kept ahead of the falling piece in the block list)
    pub fn add_block(&mut self, block: Block) {
        match self.falling.as_mut() {
            Some(falling) => {
                self.blocks.insert(falling.start, block);
                falling.start += 1;
            }
            None => self.blocks.push(block),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.move_piece(0, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_piece(0, 1)
    }

    /// Move the falling piece one row down. Returns false when blocked.
    pub fn move_down(&mut self) -> bool {
        self.move_piece(-1, 0)
    }

    /// Translate the falling piece. Either the whole piece moves or, on
    /// collision, nothing does.
    pub fn move_piece(&mut self, row: i32, column: i32) -> bool {
        if self.falling.is_none() {
            return false;
        }

        pieces::translate(self.falling_blocks_mut(), row, column);

        if self.has_collisions() {
            pieces::translate(self.falling_blocks_mut(), -row, -column);
            return false;
        }
        true
    }

    /// Rotate the falling piece 90° around its first block.
    ///
    /// A colliding rotation is retried with the [`WALL_KICK_OFFSETS`]; if none of
    /// them fits, every block goes back to where it was. Returns whether the
    /// piece ended up rotated.
    pub fn rotate(&mut self) -> bool {
        let Some(falling) = self.falling else {
            return false;
        };
        if !falling.can_rotate {
            return false;
        }

        let saved = pieces::snapshot(&self.blocks[falling.start..]);
        pieces::rotate_about_first(self.falling_blocks_mut());

        if self.has_collisions() && !self.resolve_collisions_after_rotation() {
            pieces::restore(self.falling_blocks_mut(), &saved);
            return false;
        }
        true
    }

    /// First-fit search over the wall-kick offsets
    fn resolve_collisions_after_rotation(&mut self) -> bool {
        WALL_KICK_OFFSETS
            .iter()
            .any(|&offset| self.move_piece(0, offset))
    }

    /// Drop the falling piece as far as it goes. Returns the number of rows fallen.
    pub fn fall(&mut self) -> u32 {
        let mut rows = 0;
        while self.move_down() {
            rows += 1;
        }
        rows
    }

    /// Stop tracking the falling piece; its blocks stay on the board
    pub fn settle_falling(&mut self) {
        self.falling = None;
    }

    /// Remove the falling piece's blocks from the board
    pub fn remove_falling(&mut self) {
        if let Some(falling) = self.falling.take() {
            self.blocks.truncate(falling.start);
        }
    }

    /// Remove every full row and shift the rows above down.
    ///
    /// Rows are scanned from the top down and each clear shifts the rows above
    /// it immediately, so stacked full rows are all caught. Returns the number
    /// of rows removed.
    pub fn remove_full_rows(&mut self) -> u32 {
        let mut removed = 0;
        for row in (0..self.height).rev() {
            if self.row_len(row) == self.width as usize {
                self.remove_row(row);
                self.move_down_blocks_above(row);
                removed += 1;
            }
        }
        removed
    }

    /// Number of blocks in a row
    pub fn row_len(&self, row: i32) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.position().row == row)
            .count()
    }

    fn remove_row(&mut self, row: i32) {
        let falling_start = self.falling.map(|f| f.start);
        let mut index = 0;
        let mut kept_before_falling = 0;

        self.blocks.retain(|b| {
            let keep = b.position().row != row;
            if keep && falling_start.map_or(true, |start| index < start) {
                kept_before_falling += 1;
            }
            index += 1;
            keep
        });

        if let Some(falling) = self.falling.as_mut() {
            falling.start = kept_before_falling;
        }
    }

    fn move_down_blocks_above(&mut self, row: i32) {
        for block in self.blocks.iter_mut().filter(|b| b.position().row > row) {
            block.move_by(-1, 0);
        }
    }

    /// Clear the board entirely
    pub fn remove_all_blocks(&mut self) {
        self.blocks.clear();
        self.falling = None;
    }

    /// Order-independent hash of the block layout
    pub fn state_hash(&self) -> u64 {
        let cells = (self.width as i64) * (self.height as i64);
        self.blocks.iter().fold(0u64, |hash, block| {
            let Position { row, column } = block.position();
            let offset = cells * block.piece_type().index() as i64;
            let block_hash = offset + (row as i64) * (self.width as i64) + column as i64;
            hash.wrapping_add(block_hash as u64)
        })
    }
}
