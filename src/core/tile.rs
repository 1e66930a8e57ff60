//! Tiles: the claimable scoring pieces.
//!
//! There are sixteen tiles valued 21 through 36. Each carries between one
//! and four worms, in bands of four values. A tile's value is its identity:
//! no two tiles share one, which is what lets the [`TileTable`] track
//! ownership by value alone.
//!
//! [`TileTable`]: crate::tiles::TileTable

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Lowest tile value.
pub const MIN_TILE_VALUE: u8 = 21;

/// Highest tile value.
pub const MAX_TILE_VALUE: u8 = 36;

/// Number of tiles in a game.
pub const TILE_COUNT: usize = (MAX_TILE_VALUE - MIN_TILE_VALUE + 1) as usize;

/// A tile, identified by its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    value: u8,
}

impl Tile {
    /// Create the tile with the given value.
    ///
    /// Fails with [`GameError::InvalidTileValue`] outside `21..=36`.
    pub fn new(value: u8) -> Result<Self, GameError> {
        if (MIN_TILE_VALUE..=MAX_TILE_VALUE).contains(&value) {
            Ok(Self { value })
        } else {
            Err(GameError::InvalidTileValue { value })
        }
    }

    /// The score needed to claim this tile.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Worms printed on the tile.
    #[must_use]
    pub const fn worms(self) -> u32 {
        match self.value {
            0..=24 => 1,
            25..=28 => 2,
            29..=32 => 3,
            _ => 4,
        }
    }

    /// Every tile of a fresh game, lowest first.
    pub fn all() -> impl Iterator<Item = Tile> {
        (MIN_TILE_VALUE..=MAX_TILE_VALUE).map(|value| Tile { value })
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}w]", self.value, self.worms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worm_bands() {
        for value in MIN_TILE_VALUE..=MAX_TILE_VALUE {
            let worms = match value {
                21..=24 => 1,
                25..=28 => 2,
                29..=32 => 3,
                _ => 4,
            };
            assert_eq!(Tile::new(value).unwrap().worms(), worms, "tile {}", value);
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(Tile::new(20), Err(GameError::InvalidTileValue { value: 20 }));
        assert_eq!(Tile::new(37), Err(GameError::InvalidTileValue { value: 37 }));
    }

    #[test]
    fn test_all_tiles() {
        let tiles: Vec<_> = Tile::all().collect();
        assert_eq!(tiles.len(), TILE_COUNT);
        assert_eq!(tiles.first().map(|t| t.value()), Some(21));
        assert_eq!(tiles.last().map(|t| t.value()), Some(36));

        let total_worms: u32 = tiles.iter().map(|t| t.worms()).sum();
        assert_eq!(total_worms, 40);
    }
}
