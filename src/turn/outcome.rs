//! How a turn ended. Tile effects are already applied when these are built.

use serde::{Deserialize, Serialize};

use crate::core::Tile;
use crate::rules::TileSource;
use crate::tiles::BustPenalty;

/// Why a turn failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BustReason {
    /// Every face in the roll had already been reserved.
    NoLegalValue,
    /// The turn ended without a worm among the reserved dice.
    NoWorm,
    /// A worm was reserved but no bank or opponent tile matched the score.
    NoEligibleTile,
}

impl std::fmt::Display for BustReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            BustReason::NoLegalValue => "no legal value to reserve",
            BustReason::NoWorm => "no worm reserved",
            BustReason::NoEligibleTile => "no tile within reach of the score",
        };
        f.write_str(text)
    }
}

/// How a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Success { tile: Tile, source: TileSource },
    Bust { reason: BustReason, penalty: BustPenalty },
}

impl TurnOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, TurnOutcome::Success { .. })
    }

    /// The tile gained, if the turn succeeded.
    #[must_use]
    pub fn tile(&self) -> Option<Tile> {
        match self {
            TurnOutcome::Success { tile, .. } => Some(*tile),
            TurnOutcome::Bust { .. } => None,
        }
    }

    #[must_use]
    pub fn bust_reason(&self) -> Option<BustReason> {
        match self {
            TurnOutcome::Success { .. } => None,
            TurnOutcome::Bust { reason, .. } => Some(*reason),
        }
    }
}
