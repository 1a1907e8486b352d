//! Terminal input module (engine-facing).
//!
//! This crate is independent of any UI framework. It maps `crossterm` key events
//! into [`crate::types::PlayerAction`] and provides a key-repeat handler that
//! implements [`tomino_core::PlayerInput`], so it can be plugged straight into a
//! [`tomino_core::Game`].

pub mod handler;
pub mod map;

pub use tomino_types as types;

pub use handler::KeyRepeatInput;
pub use map::{action_for_key, handle_key_event, is_pause_key, should_quit};
