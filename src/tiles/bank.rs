//! The shared pool of unclaimed tiles (the "center").

use serde::{Deserialize, Serialize};

use crate::core::{GameError, Tile};

/// Unclaimed tiles, unique by value, kept lowest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBank {
    tiles: Vec<Tile>,
}

impl Default for TileBank {
    fn default() -> Self {
        Self::new()
    }
}

impl TileBank {
    /// A full bank holding all sixteen tiles.
    #[must_use]
    pub fn new() -> Self {
        let mut bank = Self { tiles: Vec::new() };
        bank.initialize();
        bank
    }

    /// Refill with all sixteen tiles, each value exactly once.
    pub fn initialize(&mut self) {
        self.tiles = Tile::all().collect();
    }

    /// Tiles whose value is at most `score`, lowest first.
    #[must_use]
    pub fn eligible_center_tiles(&self, score: u32) -> Vec<Tile> {
        self.tiles
            .iter()
            .copied()
            .filter(|t| u32::from(t.value()) <= score)
            .collect()
    }

    /// Destroy the highest remaining tile and return it.
    pub fn remove_highest(&mut self) -> Result<Tile, GameError> {
        self.tiles.pop().ok_or(GameError::BankEmpty)
    }

    /// Remove and return the tile with exactly `value`.
    pub fn take(&mut self, value: u8) -> Result<Tile, GameError> {
        let idx = self
            .tiles
            .iter()
            .position(|t| t.value() == value)
            .ok_or(GameError::TileNotFound { value })?;
        Ok(self.tiles.remove(idx))
    }

    #[must_use]
    pub fn contains(&self, value: u8) -> bool {
        self.tiles.iter().any(|t| t.value() == value)
    }

    #[must_use]
    pub fn highest(&self) -> Option<Tile> {
        self.tiles.last().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Remaining tiles, lowest first.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
