//! Tomino (workspace facade crate).
//!
//! The engine lives in dedicated crates under `crates/`; this package re-exports
//! them as `tomino::{core,input,types}` and adds the host-side pieces: game
//! configuration and player settings.

pub use tomino_core as core;
pub use tomino_input as input;
pub use tomino_types as types;

pub mod config;
pub mod settings;
