//! Record of completed turns.
//!
//! Records are kept in an `im::Vector`, so cloning the history for a
//! snapshot or a strategy's view shares structure with the live game.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{DiceRoll, DiceValue, PlayerId, PlayerMap, Tile};
use crate::turn::{TurnOutcome, TurnState};

/// One finished turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based, counted across all players.
    pub turn_number: u32,
    pub player: PlayerId,
    pub rolls: Vec<DiceRoll>,
    /// Final reservation, in order.
    pub reserved: Vec<(DiceValue, u8)>,
    pub score: u32,
    pub has_worm: bool,
    pub outcome: TurnOutcome,
    /// Every player's worm total once the turn's tile effects applied.
    pub worms_after: PlayerMap<u32>,
}

impl TurnRecord {
    pub(crate) fn new(
        turn_number: u32,
        state: &TurnState,
        outcome: TurnOutcome,
        worms_after: PlayerMap<u32>,
    ) -> Self {
        Self {
            turn_number,
            player: state.player(),
            rolls: state.rolls().to_vec(),
            reserved: state.reserved().to_vec(),
            score: state.score(),
            has_worm: state.has_worm(),
            outcome,
            worms_after,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Per-player summary over a game's history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub total_turns: usize,
    pub successful_turns: usize,
    pub failed_turns: usize,
    pub success_rate: f64,
    pub average_score_on_success: f64,
    pub tiles_taken: Vec<Tile>,
    pub total_worms_gained: u32,
}

/// All completed turns of one game, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameHistory {
    turns: Vector<TurnRecord>,
}

impl GameHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: TurnRecord) {
        self.turns.push_back(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> impl Iterator<Item = &TurnRecord> {
        self.turns.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&TurnRecord> {
        self.turns.last()
    }

    pub fn player_turns(&self, player: PlayerId) -> impl Iterator<Item = &TurnRecord> {
        self.turns.iter().filter(move |t| t.player == player)
    }

    /// The last `count` turns, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &TurnRecord> {
        self.turns.iter().skip(self.turns.len().saturating_sub(count))
    }

    /// Summary for `player`, or `None` if they have not finished a turn.
    #[must_use]
    pub fn player_statistics(&self, player: PlayerId) -> Option<PlayerStatistics> {
        let total_turns = self.player_turns(player).count();
        if total_turns == 0 {
            return None;
        }

        let successes: Vec<&TurnRecord> = self
            .player_turns(player)
            .filter(|t| t.is_success())
            .collect();
        let successful_turns = successes.len();
        let tiles_taken: Vec<Tile> = successes.iter().filter_map(|t| t.outcome.tile()).collect();
        let average_score_on_success = if successes.is_empty() {
            0.0
        } else {
            successes.iter().map(|t| f64::from(t.score)).sum::<f64>() / successful_turns as f64
        };

        Some(PlayerStatistics {
            total_turns,
            successful_turns,
            failed_turns: total_turns - successful_turns,
            success_rate: successful_turns as f64 / total_turns as f64,
            average_score_on_success,
            total_worms_gained: tiles_taken.iter().map(|t| t.worms()).sum(),
            tiles_taken,
        })
    }
}
