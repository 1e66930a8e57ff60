//! Serializable projections of a game for UIs and logs.
//!
//! The crate owns no wire format: these types derive serde traits and the
//! caller picks the encoding.

use serde::{Deserialize, Serialize};

use crate::core::{DiceValue, PlayerId, Tile};
use crate::rules::{GameResult, TileOffer};
use crate::turn::{PhaseKind, TurnEngine, TurnOutcome};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub relay: bool,
    /// Bottom to top.
    pub tiles: Vec<Tile>,
    pub worms: u32,
}

/// The active turn as a client would render it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub player: PlayerId,
    pub phase: PhaseKind,
    pub current_roll: Vec<DiceValue>,
    pub legal_values: Vec<DiceValue>,
    pub reserved: Vec<(DiceValue, u8)>,
    pub score: u32,
    pub has_worm: bool,
    pub remaining_dice: u8,
    pub offer: Option<TileOffer>,
    pub outcome: Option<TurnOutcome>,
}

impl TurnSnapshot {
    #[must_use]
    pub fn from_turn(turn: &TurnEngine) -> Self {
        let state = turn.state();
        Self {
            player: turn.player(),
            phase: turn.kind(),
            current_roll: state.current_roll().to_vec(),
            legal_values: state.legal_values().to_vec(),
            reserved: state.reserved().to_vec(),
            score: state.score(),
            has_worm: state.has_worm(),
            remaining_dice: state.remaining_dice(),
            offer: turn.offer().cloned(),
            outcome: turn.outcome().copied(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn_number: u32,
    pub current_player: PlayerId,
    pub players: Vec<PlayerSnapshot>,
    /// Ascending.
    pub bank: Vec<Tile>,
    pub removed: Vec<Tile>,
    pub turn: Option<TurnSnapshot>,
    pub result: Option<GameResult>,
}

impl GameSnapshot {
    /// Tiles accounted for across bank, stacks and the removed pile.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        let held: usize = self.players.iter().map(|p| p.tiles.len()).sum();
        self.bank.len() + self.removed.len() + held
    }
}
