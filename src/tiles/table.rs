//! Tile ownership across the bank, player stacks and the removed pile.
//!
//! The `TileTable` is the single place tiles move. Each tile value is tagged
//! with exactly one [`TileLocation`]; a move re-tags it and updates the two
//! containers involved. Every move validates first and mutates second, so a
//! failed move leaves the table untouched.
//!
//! ```
//! use rust_pikomino::core::PlayerId;
//! use rust_pikomino::tiles::{TileLocation, TileTable};
//!
//! let mut table = TileTable::new(2);
//! let alice = PlayerId::new(0);
//!
//! table.claim_from_bank(alice, 23).unwrap();
//! assert_eq!(table.location(23), Some(TileLocation::Player(alice)));
//! assert!(table.check_conservation().is_ok());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::bank::TileBank;
use super::stack::PlayerTileStack;
use crate::core::{GameError, PlayerId, PlayerMap, Tile, TILE_COUNT};

/// Where a tile currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileLocation {
    /// Unclaimed, in the center.
    Bank,
    /// In this player's stack.
    Player(PlayerId),
    /// Out of play for good.
    Removed,
}

/// An opponent's top tile that matches the score exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealCandidate {
    pub tile: Tile,
    pub owner: PlayerId,
}

/// What a bust cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BustPenalty {
    /// The acting player's former top tile, if they had one.
    pub lost_tile: Option<Tile>,
    /// The bank's highest tile, if the bank was not empty.
    pub discarded_from_bank: Option<Tile>,
}

/// Bank, player stacks and removed pile, with per-tile location tags.
#[derive(Clone, Debug)]
pub struct TileTable {
    bank: TileBank,
    stacks: PlayerMap<PlayerTileStack>,
    removed: Vec<Tile>,
    /// tile value -> location
    locations: FxHashMap<u8, TileLocation>,
}

impl TileTable {
    /// A fresh table: all tiles in the bank, every stack empty.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        let bank = TileBank::new();
        let locations = bank
            .tiles()
            .iter()
            .map(|t| (t.value(), TileLocation::Bank))
            .collect();

        Self {
            bank,
            stacks: PlayerMap::with_default(player_count),
            removed: Vec::new(),
            locations,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.stacks.player_count()
    }

    #[must_use]
    pub fn bank(&self) -> &TileBank {
        &self.bank
    }

    #[must_use]
    pub fn stack(&self, player: PlayerId) -> &PlayerTileStack {
        &self.stacks[player]
    }

    #[must_use]
    pub fn stacks(&self) -> &PlayerMap<PlayerTileStack> {
        &self.stacks
    }

    /// Tiles out of play, in the order they were removed.
    #[must_use]
    pub fn removed(&self) -> &[Tile] {
        &self.removed
    }

    #[must_use]
    pub fn location(&self, value: u8) -> Option<TileLocation> {
        self.locations.get(&value).copied()
    }

    #[must_use]
    pub fn worm_total(&self, player: PlayerId) -> u32 {
        self.stacks[player].worm_total()
    }

    /// Every other player's top tile whose value equals `score` exactly.
    #[must_use]
    pub fn stealable_tiles(&self, thief: PlayerId, score: u32) -> Vec<StealCandidate> {
        self.stacks
            .iter()
            .filter(|(owner, _)| *owner != thief)
            .filter_map(|(owner, stack)| {
                let tile = stack.peek_top()?;
                (u32::from(tile.value()) == score).then_some(StealCandidate { tile, owner })
            })
            .collect()
    }

    /// Move a tile from the bank onto `player`'s stack.
    pub fn claim_from_bank(&mut self, player: PlayerId, value: u8) -> Result<Tile, GameError> {
        self.check_seat(player)?;
        let tile = self.bank.take(value)?;
        self.stacks[player].push(tile);
        self.locations.insert(value, TileLocation::Player(player));
        Ok(tile)
    }

    /// Move `victim`'s top tile onto `thief`'s stack.
    ///
    /// The victim's top is re-checked against `value`, so a stale candidate
    /// fails with [`GameError::TileNotFound`] instead of moving the wrong tile.
    pub fn steal(
        &mut self,
        thief: PlayerId,
        victim: PlayerId,
        value: u8,
    ) -> Result<Tile, GameError> {
        self.check_seat(thief)?;
        self.check_seat(victim)?;
        if thief == victim {
            return Err(GameError::InvalidTileChoice {
                reason: format!("{} cannot steal from their own stack", thief),
            });
        }
        match self.stacks[victim].peek_top() {
            Some(top) if top.value() == value => {}
            _ => return Err(GameError::TileNotFound { value }),
        }

        let tile = self.stacks[victim]
            .pop_top()
            .ok_or(GameError::TileNotFound { value })?;
        self.stacks[thief].push(tile);
        self.locations.insert(value, TileLocation::Player(thief));
        Ok(tile)
    }

    /// Apply the bust penalty to `player`.
    ///
    /// The player's top tile (if any) and the bank's highest tile (if any)
    /// both leave play. The two losses are independent.
    pub fn apply_bust(&mut self, player: PlayerId) -> Result<BustPenalty, GameError> {
        self.check_seat(player)?;

        let lost_tile = self.stacks[player].pop_top();
        if let Some(tile) = lost_tile {
            self.retire(tile);
        }

        let discarded_from_bank = if self.bank.is_empty() {
            None
        } else {
            let tile = self.bank.remove_highest()?;
            self.retire(tile);
            Some(tile)
        };

        Ok(BustPenalty {
            lost_tile,
            discarded_from_bank,
        })
    }

    /// Verify that bank, stacks and removed pile hold each of the sixteen
    /// values exactly once, and that every location tag agrees.
    pub fn check_conservation(&self) -> Result<(), GameError> {
        let mut seen: FxHashMap<u8, TileLocation> = FxHashMap::default();
        let mut record = |tile: Tile, at: TileLocation| -> Result<(), GameError> {
            if let Some(previous) = seen.insert(tile.value(), at) {
                return Err(GameError::ConservationViolated(format!(
                    "tile {} found in {:?} and {:?}",
                    tile.value(),
                    previous,
                    at
                )));
            }
            Ok(())
        };

        for &tile in self.bank.tiles() {
            record(tile, TileLocation::Bank)?;
        }
        for (player, stack) in self.stacks.iter() {
            for &tile in stack.tiles() {
                record(tile, TileLocation::Player(player))?;
            }
        }
        for &tile in &self.removed {
            record(tile, TileLocation::Removed)?;
        }

        if seen.len() != TILE_COUNT {
            return Err(GameError::ConservationViolated(format!(
                "{} of {} tiles accounted for",
                seen.len(),
                TILE_COUNT
            )));
        }
        for tile in Tile::all() {
            let actual = seen.get(&tile.value()).copied();
            if actual != self.location(tile.value()) {
                return Err(GameError::ConservationViolated(format!(
                    "tile {} tagged {:?} but held in {:?}",
                    tile.value(),
                    self.location(tile.value()),
                    actual
                )));
            }
        }
        Ok(())
    }

    fn retire(&mut self, tile: Tile) {
        self.removed.push(tile);
        self.locations.insert(tile.value(), TileLocation::Removed);
    }

    fn check_seat(&self, player: PlayerId) -> Result<(), GameError> {
        if self.stacks.contains(player) {
            Ok(())
        } else {
            Err(GameError::InvalidConfig(format!(
                "{} has no seat at a {}-player table",
                player,
                self.player_count()
            )))
        }
    }
}
