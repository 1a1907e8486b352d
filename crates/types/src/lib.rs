//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental value types used throughout the engine.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, input adapters and any host (renderer, audio, replay tools).
//!
//! # Coordinates
//!
//! Positions are `(row, column)` pairs. Row `0` is the **bottom** of the board and
//! row `height - 1` is the top; column `0` is the leftmost column.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FALL_DELAY_MS` | 1000 | Idle time before the falling piece drops one row |
//! | `KEY_REPEAT_DELAY_MS` | 180 | Hold time before a movement key starts repeating |
//! | `KEY_REPEAT_INTERVAL_MS` | 70 | Interval between repeats of a held movement key |
//!
//! # Examples
//!
//! ```
//! use tomino_types::{PieceType, PlayerAction, Position, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! let p = Position::new(3, 4).offset(-1, 2);
//! assert_eq!(p, Position::new(2, 6));
//!
//! assert_eq!(PieceType::from_str("t"), Some(PieceType::T));
//! assert_eq!(PlayerAction::from_str("moveLeft"), Some(PlayerAction::MoveLeft));
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: i32 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: i32 = 20;

/// Number of blocks in every piece
pub const PIECE_BLOCKS: usize = 4;

/// Idle time before the falling piece is moved down automatically (1 second)
pub const FALL_DELAY_MS: u32 = 1000;

/// Hold time before a held movement key starts repeating
pub const KEY_REPEAT_DELAY_MS: u32 = 180;

/// Interval between repeats of a held movement key
pub const KEY_REPEAT_INTERVAL_MS: u32 = 70;

/// Row clear bonus indexed by the number of rows cleared at once.
///
/// Counts outside `1..=4` award nothing.
pub const ROW_CLEAR_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per row for a piece dropped with [`PlayerAction::Fall`]
pub const FALL_POINTS_PER_ROW: u32 = 2;

/// Points for a single-row move down
pub const MOVE_DOWN_POINTS: u32 = 1;

/// Rows that must be cleared to advance one level
pub const ROWS_PER_LEVEL: u32 = 10;

/// A cell address on the board.
///
/// Two positions are equal iff both components match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Position shifted by the given row/column offsets
    pub const fn offset(self, row: i32, column: i32) -> Self {
        Self {
            row: self.row + row,
            column: self.column + column,
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, column): (i32, i32)) -> Self {
        Self { row, column }
    }
}

/// The seven standard piece shapes.
///
/// The type only tags blocks for identity (rendering, board hash); it plays no
/// part in collision or movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceType {
    /// Every piece type in ordinal order
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::J,
        PieceType::L,
        PieceType::O,
        PieceType::S,
        PieceType::T,
        PieceType::Z,
    ];

    /// Stable ordinal of the type (`I = 0` .. `Z = 6`)
    pub fn index(&self) -> usize {
        match self {
            PieceType::I => 0,
            PieceType::J => 1,
            PieceType::L => 2,
            PieceType::O => 3,
            PieceType::S => 4,
            PieceType::T => 5,
            PieceType::Z => 6,
        }
    }

    /// Parse piece type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tomino_types::PieceType;
    ///
    /// assert_eq!(PieceType::from_str("i"), Some(PieceType::I));
    /// assert_eq!(PieceType::from_str("O"), Some(PieceType::O));
    /// assert_eq!(PieceType::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceType::I),
            "j" => Some(PieceType::J),
            "l" => Some(PieceType::L),
            "o" => Some(PieceType::O),
            "s" => Some(PieceType::S),
            "t" => Some(PieceType::T),
            "z" => Some(PieceType::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceType::I => "i",
            PieceType::J => "j",
            PieceType::L => "l",
            PieceType::O => "o",
            PieceType::S => "s",
            PieceType::T => "t",
            PieceType::Z => "z",
        }
    }
}

/// Player actions that can be applied to the falling piece
///
/// Input sources report `Option<PlayerAction>` per tick; `None` means
/// "no action", in which case gravity applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one row down (locks it when blocked)
    MoveDown,
    /// Rotate piece 90° with wall-kick recovery
    Rotate,
    /// Drop piece to the lowest legal row and lock it
    Fall,
}

impl PlayerAction {
    /// Every action, in declaration order
    pub const ALL: [PlayerAction; 5] = [
        PlayerAction::MoveLeft,
        PlayerAction::MoveRight,
        PlayerAction::MoveDown,
        PlayerAction::Rotate,
        PlayerAction::Fall,
    ];

    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use tomino_types::PlayerAction;
    ///
    /// assert_eq!(PlayerAction::from_str("moveDown"), Some(PlayerAction::MoveDown));
    /// assert_eq!(PlayerAction::from_str("FALL"), Some(PlayerAction::Fall));
    /// assert_eq!(PlayerAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(PlayerAction::MoveLeft),
            "moveright" => Some(PlayerAction::MoveRight),
            "movedown" => Some(PlayerAction::MoveDown),
            "rotate" => Some(PlayerAction::Rotate),
            "fall" => Some(PlayerAction::Fall),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::MoveLeft => "moveLeft",
            PlayerAction::MoveRight => "moveRight",
            PlayerAction::MoveDown => "moveDown",
            PlayerAction::Rotate => "rotate",
            PlayerAction::Fall => "fall",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_clear_table_matches_scoring_rules() {
        assert_eq!(ROW_CLEAR_SCORES[1], 100);
        assert_eq!(ROW_CLEAR_SCORES[2], 300);
        assert_eq!(ROW_CLEAR_SCORES[3], 500);
        assert_eq!(ROW_CLEAR_SCORES[4], 800);
        assert_eq!(FALL_POINTS_PER_ROW, 2);
        assert_eq!(MOVE_DOWN_POINTS, 1);
    }

    #[test]
    fn piece_type_index_follows_all_order() {
        for (i, kind) in PieceType::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceType::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn action_string_round_trip() {
        for action in PlayerAction::ALL {
            assert_eq!(PlayerAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn position_equality_is_by_value() {
        assert_eq!(Position::new(1, 2), Position::from((1, 2)));
        assert_ne!(Position::new(1, 2), Position::new(2, 1));
    }
}
