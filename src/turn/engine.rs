//! The resumable turn state machine.
//!
//! A turn moves through these phases:
//!
//! ```text
//! Rolling ──roll──▶ AwaitingValueChoice ──reserve──▶ AwaitingContinue
//!    ▲                     │                            │      │
//!    └─────────────────────┼──────── continue ──────────┘      │ stop
//!                          │ (no legal value / no dice left)   ▼
//!                          └──────────▶ resolve ◀──────────────┘
//!                                         │
//!                      AwaitingTileChoice ◀┴▶ Complete(Bust)
//!                              │
//!                         claim_tile
//!                              ▼
//!                      Complete(Success)
//! ```
//!
//! Each step is a method that validates the current phase, applies the
//! decision, and returns the phase it left the turn in. The engine never
//! calls a strategy itself, so a caller can pause at any decision point and
//! resume later with an externally supplied answer.
//!
//! ```
//! use rust_pikomino::core::{DiceValue::*, LoadedDice, PlayerId};
//! use rust_pikomino::tiles::TileTable;
//! use rust_pikomino::turn::{PhaseKind, TurnEngine};
//!
//! let mut table = TileTable::new(2);
//! let mut dice = LoadedDice::new([Worm, Worm, Worm, Worm, Worm, Five, Five, Five]);
//! let mut turn = TurnEngine::new(PlayerId::new(0));
//!
//! assert_eq!(turn.roll(&mut dice, &mut table).unwrap(), PhaseKind::AwaitingValueChoice);
//! assert_eq!(turn.reserve(Worm, &mut table).unwrap(), PhaseKind::AwaitingContinue);
//! assert_eq!(turn.decide_continue(false, &mut table).unwrap(), PhaseKind::AwaitingTileChoice);
//! assert_eq!(turn.offer().unwrap().score, 25);
//! ```

use serde::{Deserialize, Serialize};

use super::outcome::{BustReason, TurnOutcome};
use super::state::TurnState;
use crate::core::{DiceRoll, DiceSource, DiceValue, GameError, PlayerId, Tile};
use crate::rules::{TileOffer, TileSource};
use crate::tiles::TileTable;

/// Where a turn stands, with the data its next step needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Dice must be thrown.
    Rolling,
    /// A face from the current roll must be chosen.
    AwaitingValueChoice,
    /// The player must decide whether to roll again.
    AwaitingContinue,
    /// The turn qualified; a tile must be picked from the offer.
    AwaitingTileChoice(TileOffer),
    /// Resolved. Tile effects have already been applied.
    Complete(TurnOutcome),
}

/// Data-free tag for [`TurnPhase`], used in errors and step results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Rolling,
    AwaitingValueChoice,
    AwaitingContinue,
    AwaitingTileChoice,
    Complete,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PhaseKind::Rolling => "Rolling",
            PhaseKind::AwaitingValueChoice => "AwaitingValueChoice",
            PhaseKind::AwaitingContinue => "AwaitingContinue",
            PhaseKind::AwaitingTileChoice => "AwaitingTileChoice",
            PhaseKind::Complete => "Complete",
        };
        f.write_str(name)
    }
}

impl TurnPhase {
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            TurnPhase::Rolling => PhaseKind::Rolling,
            TurnPhase::AwaitingValueChoice => PhaseKind::AwaitingValueChoice,
            TurnPhase::AwaitingContinue => PhaseKind::AwaitingContinue,
            TurnPhase::AwaitingTileChoice(_) => PhaseKind::AwaitingTileChoice,
            TurnPhase::Complete(_) => PhaseKind::Complete,
        }
    }
}

/// Drives one player's turn against a shared [`TileTable`].
///
/// The table is borrowed per step rather than owned, so the same table
/// carries over from turn to turn. Tile effects happen only when the turn
/// resolves; until then the table is untouched.
#[derive(Clone, Debug)]
pub struct TurnEngine {
    state: TurnState,
    phase: TurnPhase,
}

impl TurnEngine {
    /// Start a turn for `player` with eight dice in hand.
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            state: TurnState::new(player),
            phase: TurnPhase::Rolling,
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.state.player()
    }

    #[must_use]
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, TurnPhase::Complete(_))
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&TurnOutcome> {
        match &self.phase {
            TurnPhase::Complete(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The pending tile offer, while a tile choice is awaited.
    #[must_use]
    pub fn offer(&self) -> Option<&TileOffer> {
        match &self.phase {
            TurnPhase::AwaitingTileChoice(offer) => Some(offer),
            _ => None,
        }
    }

    /// Throw every die still in hand.
    ///
    /// If no face in the roll can be reserved, the turn busts immediately
    /// with [`BustReason::NoLegalValue`].
    pub fn roll<D: DiceSource + ?Sized>(
        &mut self,
        dice: &mut D,
        table: &mut TileTable,
    ) -> Result<PhaseKind, GameError> {
        self.expect(PhaseKind::Rolling)?;

        let roll: DiceRoll = (0..self.state.remaining_dice())
            .map(|_| dice.roll_die())
            .collect();
        tracing::debug!("{} rolled {:?}", self.player(), roll.as_slice());
        self.state.record_roll(roll);

        if self.state.legal_values().is_empty() {
            return self.resolve(table, Some(BustReason::NoLegalValue));
        }
        self.phase = TurnPhase::AwaitingValueChoice;
        Ok(self.kind())
    }

    /// Set aside every die showing `value`.
    ///
    /// Fails with [`GameError::InvalidReservation`] if `value` is absent
    /// from the roll or already reserved; the turn is left unchanged. When
    /// the last die is set aside the turn resolves without asking to
    /// continue.
    pub fn reserve(
        &mut self,
        value: DiceValue,
        table: &mut TileTable,
    ) -> Result<PhaseKind, GameError> {
        self.expect(PhaseKind::AwaitingValueChoice)?;

        let moved = self.state.reserve(value)?;
        tracing::debug!(
            "{} reserved {}x{} (score {}, {} dice left)",
            self.player(),
            moved,
            value,
            self.state.score(),
            self.state.remaining_dice()
        );

        if self.state.remaining_dice() == 0 {
            return self.resolve(table, None);
        }
        self.phase = TurnPhase::AwaitingContinue;
        Ok(self.kind())
    }

    /// Roll again (`true`) or stop and resolve (`false`).
    pub fn decide_continue(
        &mut self,
        again: bool,
        table: &mut TileTable,
    ) -> Result<PhaseKind, GameError> {
        self.expect(PhaseKind::AwaitingContinue)?;
        if self.state.remaining_dice() == 0 {
            return Err(GameError::IllegalContinue);
        }

        if again {
            self.phase = TurnPhase::Rolling;
            Ok(self.kind())
        } else {
            tracing::debug!("{} stops at {}", self.player(), self.state.score());
            self.resolve(table, None)
        }
    }

    /// Claim `choice` from the pending offer.
    ///
    /// `None` and tiles not in the offer are rejected with
    /// [`GameError::InvalidTileChoice`]; the turn stays in
    /// `AwaitingTileChoice`.
    pub fn claim_tile(
        &mut self,
        choice: Option<Tile>,
        table: &mut TileTable,
    ) -> Result<PhaseKind, GameError> {
        let offer = match &self.phase {
            TurnPhase::AwaitingTileChoice(offer) => offer,
            other => {
                return Err(GameError::WrongPhase {
                    expected: PhaseKind::AwaitingTileChoice,
                    actual: other.kind(),
                })
            }
        };
        let tile = choice.ok_or_else(|| GameError::InvalidTileChoice {
            reason: format!(
                "no tile chosen with {} candidates on offer",
                offer.candidates().count()
            ),
        })?;
        let source = offer.source_of(tile).ok_or_else(|| GameError::InvalidTileChoice {
            reason: format!("tile {} is not on offer for score {}", tile.value(), offer.score),
        })?;

        let player = self.player();
        let claimed = match source {
            TileSource::Center => table.claim_from_bank(player, tile.value())?,
            TileSource::Opponent(owner) => table.steal(player, owner, tile.value())?,
        };
        tracing::debug!("{} claimed {} from {:?}", player, claimed, source);

        self.phase = TurnPhase::Complete(TurnOutcome::Success { tile: claimed, source });
        Ok(self.kind())
    }

    /// Settle the turn: offer tiles if it qualifies, otherwise apply the bust.
    fn resolve(
        &mut self,
        table: &mut TileTable,
        forced: Option<BustReason>,
    ) -> Result<PhaseKind, GameError> {
        let player = self.player();
        let reason = match forced {
            Some(reason) => reason,
            None => {
                let state = &self.state;
                let offer = TileOffer::build(table, player, state.score(), state.has_worm());
                if offer.is_eligible() {
                    self.phase = TurnPhase::AwaitingTileChoice(offer);
                    return Ok(self.kind());
                }
                if offer.has_worm {
                    BustReason::NoEligibleTile
                } else {
                    BustReason::NoWorm
                }
            }
        };

        let penalty = table.apply_bust(player)?;
        tracing::debug!("{} busts ({}): {:?}", player, reason, penalty);
        self.phase = TurnPhase::Complete(TurnOutcome::Bust { reason, penalty });
        Ok(self.kind())
    }

    fn expect(&self, expected: PhaseKind) -> Result<(), GameError> {
        let actual = self.kind();
        if actual == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase { expected, actual })
        }
    }
}
