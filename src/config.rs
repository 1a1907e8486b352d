//! Game configuration for hosts.
//!
//! [`GameConfig`] is what a host builds a game from. It can be read from the
//! environment (`TOMINO_*` variables) or from JSON, and converts into the
//! engine's [`GameRules`].

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::GameRules;
use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, FALL_DELAY_MS, KEY_REPEAT_DELAY_MS,
    KEY_REPEAT_INTERVAL_MS, PIECE_BLOCKS,
};

pub const DEFAULT_SEED: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub board_width: i32,
    pub board_height: i32,
    pub fall_delay_ms: u32,
    pub key_repeat_delay_ms: u32,
    pub key_repeat_interval_ms: u32,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            fall_delay_ms: FALL_DELAY_MS,
            key_repeat_delay_ms: KEY_REPEAT_DELAY_MS,
            key_repeat_interval_ms: KEY_REPEAT_INTERVAL_MS,
            seed: DEFAULT_SEED,
        }
    }
}

impl GameConfig {
    /// Read `TOMINO_BOARD_WIDTH`, `TOMINO_BOARD_HEIGHT`, `TOMINO_FALL_DELAY_MS`
    /// and `TOMINO_SEED`. Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let board_width = env::var("TOMINO_BOARD_WIDTH")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.board_width);

        let board_height = env::var("TOMINO_BOARD_HEIGHT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.board_height);

        let fall_delay_ms = env::var("TOMINO_FALL_DELAY_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.fall_delay_ms);

        let seed = env::var("TOMINO_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        Self {
            board_width,
            board_height,
            fall_delay_ms,
            seed,
            ..defaults
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid game config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize game config")
    }

    pub fn validate(&self) -> Result<()> {
        if self.board_width <= 0 || self.board_height <= 0 {
            bail!(
                "board size must be positive, got {}x{}",
                self.board_width,
                self.board_height
            );
        }
        if self.board_width < PIECE_BLOCKS as i32 {
            bail!(
                "board width {} is narrower than a piece ({} cells)",
                self.board_width,
                PIECE_BLOCKS
            );
        }
        if self.board_height < 2 {
            bail!("board height {} leaves no room to fall", self.board_height);
        }
        if self.fall_delay_ms == 0 {
            bail!("fall delay must be at least 1 ms");
        }
        Ok(())
    }

    pub fn rules(&self) -> GameRules {
        GameRules {
            board_width: self.board_width,
            board_height: self.board_height,
            fall_delay_ms: self.fall_delay_ms,
        }
    }
}
