//! A player's pile of claimed tiles.

use serde::{Deserialize, Serialize};

use crate::core::Tile;

/// LIFO pile of tiles owned by one player.
///
/// Rules only ever look at or remove the top tile.
/// Index 0 is the bottom, the last entry is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTileStack {
    tiles: Vec<Tile>,
}

impl PlayerTileStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a tile on top. The caller has already removed it from its
    /// previous location.
    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    pub fn pop_top(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    #[must_use]
    pub fn peek_top(&self) -> Option<Tile> {
        self.tiles.last().copied()
    }

    /// Sum of worms over every tile in the pile.
    #[must_use]
    pub fn worm_total(&self) -> u32 {
        self.tiles.iter().map(|t| t.worms()).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles bottom to top.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
