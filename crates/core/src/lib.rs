//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the board, pieces,
//! collision handling, rotation with wall kicks, row clearing, scoring, and the
//! tick-driven game loop. It has **no dependencies** on rendering, audio, input
//! devices or I/O; those talk to the engine through two collaborator traits
//! ([`PlayerInput`], [`PieceProvider`]) and the event registry ([`events`]).
//!
//! # Module Structure
//!
//! - [`block`]: a single occupied cell
//! - [`pieces`]: piece shapes, [`Piece`] and the geometry shared with the board
//! - [`board`]: the grid, collision checks, moves, rotation, row clearing
//! - [`scoring`]: score and level bookkeeping
//! - [`game_state`]: the [`Game`] state machine driven by `update(delta_ms)`
//! - [`events`]: game events and the observer registry
//! - [`input`] / [`provider`]: collaborator traits and stock implementations
//! - [`rng`]: seeded 7-bag generator used by [`BagPieceProvider`]
//!
//! # Example
//!
//! ```
//! use tomino_core::{Game, GameRules, QueuedInput, SequencePieceProvider};
//! use tomino_core::types::{PieceType, PlayerAction};
//!
//! let mut game = Game::new(
//!     GameRules::default(),
//!     QueuedInput::new(),
//!     SequencePieceProvider::from_types(&[PieceType::T]),
//! );
//! game.start();
//!
//! game.set_next_action(PlayerAction::Fall);
//! game.update(16);
//!
//! // The T piece fell 18 rows: 2 points per row.
//! assert_eq!(game.score(), 36);
//! ```
//!
//! # Timing
//!
//! The caller invokes [`Game::update`] at its own cadence with the elapsed time
//! in milliseconds. With no player action, the piece moves down once
//! [`GameRules::fall_delay_ms`] has accumulated (1000 ms by default).

pub mod block;
pub mod board;
pub mod events;
pub mod game_state;
pub mod input;
pub mod pieces;
pub mod provider;
pub mod rng;
pub mod scoring;

pub use tomino_types as types;

// Re-export commonly used types for convenience
pub use block::Block;
pub use board::{Board, WALL_KICK_OFFSETS};
pub use events::{EventKind, GameEvent, Observers, SubscriptionId};
pub use game_state::{Game, GameRules, GameStatus};
pub use input::{NoInput, PlayerInput, QueuedInput, UniversalInput};
pub use pieces::{get_shape, Piece, PieceView};
pub use provider::{BagPieceProvider, PieceProvider, SequencePieceProvider};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{fall_score, row_clear_score, Level, Score};
