//! Final ranking of a finished game.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several players share the top worm total. No tie-break is applied.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Rank by worm totals; the maximum wins.
    #[must_use]
    pub fn from_worm_totals(totals: &PlayerMap<u32>) -> Self {
        let best = totals.iter().map(|(_, &w)| w).max().unwrap_or(0);
        let mut leaders: Vec<PlayerId> = totals
            .iter()
            .filter(|(_, &w)| w == best)
            .map(|(p, _)| p)
            .collect();

        if leaders.len() == 1 {
            GameResult::Winner(leaders.remove(0))
        } else {
            GameResult::Winners(leaders)
        }
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }

    /// All winning seats.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            GameResult::Winner(p) => vec![*p],
            GameResult::Winners(ps) => ps.clone(),
        }
    }
}
