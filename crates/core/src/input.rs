//! Player input sources
//!
//! The game polls its input once per update for an optional action. Sources must
//! not block; "nothing pressed" is `None`.

use std::collections::VecDeque;

use crate::types::PlayerAction;

/// Source of player actions
pub trait PlayerInput {
    fn player_action(&mut self) -> Option<PlayerAction>;
}

impl<T: PlayerInput + ?Sized> PlayerInput for Box<T> {
    fn player_action(&mut self) -> Option<PlayerAction> {
        (**self).player_action()
    }
}

/// An absent input never produces actions
impl<T: PlayerInput> PlayerInput for Option<T> {
    fn player_action(&mut self) -> Option<PlayerAction> {
        self.as_mut().and_then(|input| input.player_action())
    }
}

/// Input that never acts; the piece only falls by gravity
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl PlayerInput for NoInput {
    fn player_action(&mut self) -> Option<PlayerAction> {
        None
    }
}

/// FIFO of actions pushed by buttons, scripts or tests; one is consumed per poll
#[derive(Debug, Clone, Default)]
pub struct QueuedInput {
    queue: VecDeque<PlayerAction>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: PlayerAction) {
        self.queue.push_back(action);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl Extend<PlayerAction> for QueuedInput {
    fn extend<I: IntoIterator<Item = PlayerAction>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}

impl FromIterator<PlayerAction> for QueuedInput {
    fn from_iter<I: IntoIterator<Item = PlayerAction>>(iter: I) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}

impl PlayerInput for QueuedInput {
    fn player_action(&mut self) -> Option<PlayerAction> {
        self.queue.pop_front()
    }
}

/// Combines two sources (e.g. keyboard and touch): the first one wins
#[derive(Debug, Clone, Default)]
pub struct UniversalInput<A, B> {
    primary: A,
    secondary: B,
}

impl<A: PlayerInput, B: PlayerInput> UniversalInput<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    pub fn primary_mut(&mut self) -> &mut A {
        &mut self.primary
    }

    pub fn secondary_mut(&mut self) -> &mut B {
        &mut self.secondary
    }
}

impl<A: PlayerInput, B: PlayerInput> PlayerInput for UniversalInput<A, B> {
    fn player_action(&mut self) -> Option<PlayerAction> {
        self.primary
            .player_action()
            .or_else(|| self.secondary.player_action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queued_input_fifo() {
        let mut input: QueuedInput = [PlayerAction::Rotate, PlayerAction::Fall]
            .into_iter()
            .collect();

        assert_eq!(input.player_action(), Some(PlayerAction::Rotate));
        assert_eq!(input.player_action(), Some(PlayerAction::Fall));
        assert_eq!(input.player_action(), None);
    }

    #[test]
    fn test_universal_input_prefers_primary() {
        let primary: QueuedInput = [PlayerAction::MoveLeft].into_iter().collect();
        let secondary: QueuedInput = [PlayerAction::MoveRight].into_iter().collect();
        let mut input = UniversalInput::new(primary, secondary);

        assert_eq!(input.player_action(), Some(PlayerAction::MoveLeft));
        assert_eq!(input.player_action(), Some(PlayerAction::MoveRight));
        assert_eq!(input.player_action(), None);
    }

    #[test]
    fn test_missing_input_yields_nothing() {
        let mut input: Option<QueuedInput> = None;
        assert_eq!(input.player_action(), None);
        assert_eq!(NoInput.player_action(), None);
    }
}
