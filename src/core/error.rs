//! Error types for turn and game operations.
//!
//! Every variant is a contract violation, either by a strategy or by the
//! layer driving the engine. Nothing here is retried or coerced.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dice::DiceValue;
use super::player::PlayerId;
use crate::turn::PhaseKind;

/// The three decision points a strategy answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    ChooseDiceValue,
    ContinueTurn,
    ChooseTargetTile,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Decision::ChooseDiceValue => "choose_dice_value",
            Decision::ContinueTurn => "should_continue_turn",
            Decision::ChooseTargetTile => "choose_target_tile",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot reserve {value}: not in the current roll or already reserved this turn")]
    InvalidReservation { value: DiceValue },
    #[error("Continue decision requested with no dice remaining")]
    IllegalContinue,
    #[error("Invalid tile choice: {reason}")]
    InvalidTileChoice { reason: String },
    #[error("{player} violated the {decision} contract")]
    StrategyProtocolViolation {
        player: PlayerId,
        decision: Decision,
        #[source]
        source: Box<GameError>,
    },
    #[error("Tile bank is empty")]
    BankEmpty,
    #[error("Tile {value} is not available")]
    TileNotFound { value: u8 },
    #[error("Tile value {value} is outside 21..=36")]
    InvalidTileValue { value: u8 },
    #[error("Turn is in phase {actual}, expected {expected}")]
    WrongPhase { expected: PhaseKind, actual: PhaseKind },
    #[error("No turn in progress")]
    NoTurnInProgress,
    #[error("Game is over")]
    GameOver,
    #[error("{player} must decide {decision} through the relay")]
    AwaitingExternalDecision { player: PlayerId, decision: Decision },
    #[error("{player} is strategy-driven and takes no relay answers")]
    NotRelaySeat { player: PlayerId },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Tile ownership corrupted: {0}")]
    ConservationViolated(String),
}

impl GameError {
    /// Wrap a rejected decision as a strategy fault.
    #[must_use]
    pub fn protocol_violation(player: PlayerId, decision: Decision, cause: GameError) -> Self {
        GameError::StrategyProtocolViolation {
            player,
            decision,
            source: Box::new(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_protocol_violation_keeps_cause() {
        let err = GameError::protocol_violation(
            PlayerId::new(1),
            Decision::ChooseDiceValue,
            GameError::InvalidReservation { value: DiceValue::Two },
        );

        assert_eq!(err.to_string(), "Player 1 violated the choose_dice_value contract");
        let cause = err.source().map(|e| e.to_string());
        assert_eq!(
            cause.as_deref(),
            Some("Cannot reserve 2: not in the current roll or already reserved this turn")
        );
    }
}
