//! Game state module - turn orchestration
//!
//! Ties the board, the piece provider and the input source together. Each call to
//! [`Game::update`] either applies the player's action or, when there is none,
//! advances the fall timer and moves the piece down once the delay has elapsed.
//!
//! Lifecycle: `NotStarted → Running ⇄ Paused`, and `Running → Finished` when a new
//! piece has no room to spawn. [`Game::start`] (re)starts from any state.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::events::{EventKind, GameEvent, Observers, SubscriptionId};
use crate::input::PlayerInput;
use crate::pieces::PieceView;
use crate::provider::PieceProvider;
use crate::scoring::{Level, Score};
use crate::types::{PieceType, PlayerAction, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, FALL_DELAY_MS};

/// Upper bound on events a single update can produce
const MAX_EVENTS_PER_UPDATE: usize = 8;

/// Fixed parameters of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub board_width: i32,
    pub board_height: i32,
    pub fall_delay_ms: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            fall_delay_ms: FALL_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Paused,
    Finished,
}

/// A game session
#[derive(Debug)]
pub struct Game<I, P> {
    board: Board,
    input: I,
    provider: P,
    rules: GameRules,
    score: Score,
    level: Level,
    status: GameStatus,
    elapsed_ms: u32,
    next_action: Option<PlayerAction>,
    observers: Observers,
    pending: ArrayVec<GameEvent, MAX_EVENTS_PER_UPDATE>,
}

impl<I: PlayerInput, P: PieceProvider> Game<I, P> {
    pub fn new(rules: GameRules, input: I, provider: P) -> Self {
        Self {
            board: Board::new(rules.board_width, rules.board_height),
            input,
            provider,
            rules,
            score: Score::new(),
            level: Level::new(),
            status: GameStatus::NotStarted,
            elapsed_ms: 0,
            next_action: None,
            observers: Observers::new(),
            pending: ArrayVec::new(),
        }
    }

    /// Start a new game: clear the board, reset score and timer, spawn the first piece
    pub fn start(&mut self) {
        self.board.remove_all_blocks();
        self.score.reset();
        self.level.reset();
        self.elapsed_ms = 0;
        self.next_action = None;
        self.pending.clear();
        self.status = GameStatus::Running;

        self.add_piece();
        self.dispatch();
    }

    /// Returns false unless the game was running
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    /// Returns false unless the game was paused
    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Running;
        true
    }

    /// Queue an action for the next update, ahead of the input source
    pub fn set_next_action(&mut self, action: PlayerAction) {
        self.next_action = Some(action);
    }

    /// Advance the game by `delta_ms` milliseconds
    pub fn update(&mut self, delta_ms: u32) {
        if self.status != GameStatus::Running {
            return;
        }

        let action = self
            .next_action
            .take()
            .or_else(|| self.input.player_action());

        match action {
            Some(action) => self.handle_player_action(action),
            None => {
                self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
                if self.elapsed_ms >= self.rules.fall_delay_ms {
                    self.handle_player_action(PlayerAction::MoveDown);
                }
            }
        }

        self.dispatch();
    }

    fn handle_player_action(&mut self, action: PlayerAction) {
        self.elapsed_ms = 0;

        match action {
            PlayerAction::MoveLeft => {
                if self.board.move_left() {
                    self.emit(GameEvent::PieceMoved);
                }
            }
            PlayerAction::MoveRight => {
                if self.board.move_right() {
                    self.emit(GameEvent::PieceMoved);
                }
            }
            PlayerAction::MoveDown => {
                if self.board.move_down() {
                    self.score.piece_moved_down();
                    self.emit(GameEvent::PieceMoved);
                } else {
                    self.piece_finished_falling();
                }
            }
            PlayerAction::Rotate => {
                if self.board.rotate() {
                    self.emit(GameEvent::PieceRotated);
                }
            }
            PlayerAction::Fall => {
                let rows = self.board.fall();
                self.score.piece_finished_falling(rows);
                self.piece_finished_falling();
            }
        }
    }

    /// Lock the falling piece, clear rows and bring in the next piece
    fn piece_finished_falling(&mut self) {
        self.board.settle_falling();

        let rows = self.board.remove_full_rows();
        self.score.rows_cleared(rows);
        self.emit(GameEvent::PieceLocked { rows_cleared: rows });

        if rows > 0 {
            self.emit(GameEvent::RowsCleared(rows));
            if let Some(number) = self.level.rows_cleared(rows) {
                self.emit(GameEvent::LevelUp(number));
            }
        }

        self.add_piece();
    }

    fn add_piece(&mut self) {
        let piece = self.provider.next_piece();
        self.board.add(piece);

        if self.board.has_collisions() {
            // No room to spawn: take the piece back off so the board stays valid.
            self.board.remove_falling();
            self.status = GameStatus::Finished;
            self.emit(GameEvent::Finished);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        let _ = self.pending.try_push(event);
    }

    fn dispatch(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for event in &pending {
            self.observers.notify(event);
        }
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.observers.subscribe(kind, subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling_piece(&self) -> Option<PieceView<'_>> {
        self.board.falling_piece()
    }

    pub fn next_piece_type(&self) -> Option<PieceType> {
        self.provider.preview()
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn level(&self) -> u32 {
        self.level.number()
    }

    pub fn rows_cleared(&self) -> u32 {
        self.level.rows()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Time accumulated towards the next automatic move down
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::input::QueuedInput;
    use crate::provider::SequencePieceProvider;
    use crate::types::Position;

    fn game_with(types: &[PieceType]) -> Game<QueuedInput, SequencePieceProvider> {
        Game::new(
            GameRules::default(),
            QueuedInput::new(),
            SequencePieceProvider::from_types(types),
        )
    }

    #[test]
    fn test_new_game_not_started() {
        let mut game = game_with(&[PieceType::T]);
        assert_eq!(game.status(), GameStatus::NotStarted);

        game.update(5000);
        assert!(game.board().blocks().is_empty());
    }

    #[test]
    fn test_start_spawns_piece() {
        let mut game = game_with(&[PieceType::T]);
        game.start();

        assert!(game.is_running());
        assert_eq!(game.board().blocks().len(), 4);
        assert_eq!(game.falling_piece().unwrap().top(), 19);
    }

    #[test]
    fn test_timer_accumulates_without_input() {
        let mut game = game_with(&[PieceType::T]);
        game.start();

        game.update(400);
        game.update(400);
        assert_eq!(game.elapsed_ms(), 800);
        assert_eq!(game.falling_piece().unwrap().top(), 19);

        game.update(200);
        assert_eq!(game.elapsed_ms(), 0);
        assert_eq!(game.falling_piece().unwrap().top(), 18);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_action_resets_timer() {
        let mut game = game_with(&[PieceType::T]);
        game.start();

        game.update(900);
        game.set_next_action(PlayerAction::MoveLeft);
        game.update(900);
        assert_eq!(game.elapsed_ms(), 0);

        game.update(900);
        assert_eq!(game.falling_piece().unwrap().top(), 19);
    }

    #[test]
    fn test_pause_blocks_updates() {
        let mut game = game_with(&[PieceType::T]);
        game.start();

        assert!(game.pause());
        assert!(!game.pause());
        game.update(5000);
        assert_eq!(game.falling_piece().unwrap().top(), 19);

        assert!(game.resume());
        assert!(!game.resume());
        game.update(1000);
        assert_eq!(game.falling_piece().unwrap().top(), 18);
    }

    #[test]
    fn test_spawn_collision_removes_piece() {
        let mut game = game_with(&[PieceType::O]);
        game.start();
        game.board_mut().settle_falling();
        game.board_mut().remove_all_blocks();
        game.board_mut()
            .add_block(Block::new(Position::new(19, 4), PieceType::I));

        game.piece_finished_falling();

        assert!(game.is_finished());
        assert!(!game.board().has_collisions());
        assert!(game.falling_piece().is_none());
        assert_eq!(game.board().blocks().len(), 1);
    }
}
