//! Key-repeat input handler.
//!
//! A held movement key (left, right, down) fires once on press, again after the
//! repeat delay, then once per repeat interval until released. Rotate and fall
//! fire once per press. Actions are queued and handed to the game one per poll
//! through [`PlayerInput`].
//!
//! Terminals often emit no key-release events; an optional release timeout drops
//! a held key when no press for it has been seen for that long.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::action_for_key;
use crate::types::{PlayerAction, KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS};
use tomino_core::PlayerInput;

const QUEUE_CAPACITY: usize = 16;

fn is_repeatable(action: PlayerAction) -> bool {
    matches!(
        action,
        PlayerAction::MoveLeft | PlayerAction::MoveRight | PlayerAction::MoveDown
    )
}

#[derive(Debug, Clone)]
pub struct KeyRepeatInput {
    held: Option<PlayerAction>,
    held_ms: u32,
    repeats_fired: u32,
    since_press_ms: u32,
    repeat_delay_ms: u32,
    repeat_interval_ms: u32,
    release_timeout_ms: Option<u32>,
    queue: ArrayVec<PlayerAction, QUEUE_CAPACITY>,
}

impl KeyRepeatInput {
    pub fn new() -> Self {
        Self::with_config(KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS)
    }

    pub fn with_config(repeat_delay_ms: u32, repeat_interval_ms: u32) -> Self {
        Self {
            held: None,
            held_ms: 0,
            repeats_fired: 0,
            since_press_ms: 0,
            repeat_delay_ms,
            repeat_interval_ms: repeat_interval_ms.max(1),
            release_timeout_ms: None,
            queue: ArrayVec::new(),
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn held(&self) -> Option<PlayerAction> {
        self.held
    }

    /// Number of actions waiting to be polled
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn press(&mut self, action: PlayerAction) {
        if !is_repeatable(action) {
            self.enqueue(action);
            return;
        }

        self.since_press_ms = 0;
        if self.held == Some(action) {
            // Terminal auto-repeat; our own timer drives repeats.
            return;
        }

        self.held = Some(action);
        self.held_ms = 0;
        self.repeats_fired = 0;
        self.enqueue(action);
    }

    pub fn release(&mut self, action: PlayerAction) {
        if self.held == Some(action) {
            self.release_held();
        }
    }

    /// Feed a terminal key event
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let Some(action) = action_for_key(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(action),
            KeyEventKind::Release => self.release(action),
        }
    }

    pub fn handle_key_press(&mut self, code: KeyCode) {
        if let Some(action) = action_for_key(code) {
            self.press(action);
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(action) = action_for_key(code) {
            self.release(action);
        }
    }

    /// Advance the repeat timers and queue any repeats that became due
    pub fn advance(&mut self, elapsed_ms: u32) {
        let Some(action) = self.held else {
            return;
        };

        self.since_press_ms = self.since_press_ms.saturating_add(elapsed_ms);
        if let Some(timeout) = self.release_timeout_ms {
            if self.since_press_ms > timeout {
                self.release_held();
                return;
            }
        }

        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < self.repeat_delay_ms {
            return;
        }

        let due = 1 + (self.held_ms - self.repeat_delay_ms) / self.repeat_interval_ms;
        while self.repeats_fired < due {
            self.enqueue(action);
            self.repeats_fired += 1;
        }
    }

    pub fn reset(&mut self) {
        self.release_held();
        self.queue.clear();
    }

    fn release_held(&mut self) {
        self.held = None;
        self.held_ms = 0;
        self.repeats_fired = 0;
        self.since_press_ms = 0;
    }

    fn enqueue(&mut self, action: PlayerAction) {
        let _ = self.queue.try_push(action);
    }
}

impl Default for KeyRepeatInput {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInput for KeyRepeatInput {
    fn player_action(&mut self) -> Option<PlayerAction> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.queue.remove(0))
        }
    }
}
