//! Game configuration.
//!
//! The rules fix the dice and tiles; what varies between games is the seed
//! and how many seats the table allows. Strategies and relay seats are
//! attached through [`GameBuilder`].
//!
//! [`GameBuilder`]: crate::game::GameBuilder

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Table-level configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the dice generator.
    /// Same seed and same strategies replay the same game.
    pub seed: u64,

    /// Fewest seats a game may start with.
    pub min_players: usize,

    /// Most seats a game may start with.
    pub max_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            min_players: 1,
            max_players: 8,
        }
    }
}

impl GameConfig {
    /// Create a config with default bounds and the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Check the bounds themselves and that `player_count` fits them.
    pub fn validate(&self, player_count: usize) -> Result<(), GameError> {
        if self.min_players == 0 || self.min_players > self.max_players || self.max_players > 255 {
            return Err(GameError::InvalidConfig(format!(
                "player bounds {}..={} are not usable",
                self.min_players, self.max_players
            )));
        }
        if !(self.min_players..=self.max_players).contains(&player_count) {
            return Err(GameError::InvalidConfig(format!(
                "{} players requested, table seats {}..={}",
                player_count, self.min_players, self.max_players
            )));
        }
        Ok(())
    }
}
