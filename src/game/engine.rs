//! Game loop: seat rotation, strategy calls, relay pauses and game end.
//!
//! The engine owns the [`TileTable`] and at most one active [`TurnEngine`].
//! [`GameEngine::advance`] moves the game forward until something needs
//! reporting: a completed turn, a decision only a relay player can make, or
//! the end of the game. Strategy-driven seats never pause.
//!
//! ```
//! use rust_pikomino::game::GameBuilder;
//! use rust_pikomino::strategy::{Conservative, Aggressive};
//!
//! let mut game = GameBuilder::new()
//!     .seed(7)
//!     .player("Alice", Box::new(Conservative))
//!     .player("Bob", Box::new(Aggressive))
//!     .build()
//!     .unwrap();
//!
//! let result = game.play_game().unwrap();
//! assert!(game.is_over());
//! assert!(game.table().bank().is_empty());
//! assert!(!result.winners().is_empty());
//! ```

use serde::{Deserialize, Serialize};

use super::history::{GameHistory, TurnRecord};
use super::snapshot::{GameSnapshot, PlayerSnapshot, TurnSnapshot};
use crate::core::{
    Decision, DiceSource, DiceValue, GameConfig, GameError, PlayerId, PlayerMap, Tile,
};
use crate::rules::GameResult;
use crate::strategy::{DecisionContext, Strategy};
use crate::tiles::TileTable;
use crate::turn::{PhaseKind, TurnEngine, TurnPhase};

/// Who answers a seat's decisions.
pub enum Controller {
    /// An in-process strategy, consulted synchronously.
    Strategy(Box<dyn Strategy>),
    /// An outside actor; the engine pauses and waits for `submit_*` calls.
    Relay,
}

impl Controller {
    #[must_use]
    pub fn is_relay(&self) -> bool {
        matches!(self, Controller::Relay)
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Controller::Strategy(s) => write!(f, "Strategy({})", s.name()),
            Controller::Relay => f.write_str("Relay"),
        }
    }
}

/// A decision the engine is waiting on from a relay seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    pub player: PlayerId,
    pub decision: Decision,
}

/// What [`GameEngine::advance`] stopped for.
#[derive(Clone, Debug, PartialEq)]
pub enum Progress {
    Pending(PendingDecision),
    TurnComplete(TurnRecord),
    GameOver(GameResult),
}

/// An answer to one decision point.
enum Answer {
    Value(DiceValue),
    Continue(bool),
    Tile(Option<Tile>),
}

/// A running game.
pub struct GameEngine {
    config: GameConfig,
    names: PlayerMap<String>,
    controllers: PlayerMap<Controller>,
    table: TileTable,
    dice: Box<dyn DiceSource + Send>,
    current: PlayerId,
    turn: Option<TurnEngine>,
    history: GameHistory,
    result: Option<GameResult>,
}

impl GameEngine {
    pub(crate) fn new(
        config: GameConfig,
        names: PlayerMap<String>,
        controllers: PlayerMap<Controller>,
        dice: Box<dyn DiceSource + Send>,
    ) -> Self {
        let table = TileTable::new(names.player_count());
        Self {
            config,
            names,
            controllers,
            table,
            dice,
            current: PlayerId::new(0),
            turn: None,
            history: GameHistory::new(),
            result: None,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.names.player_count()
    }

    #[must_use]
    pub fn names(&self) -> &PlayerMap<String> {
        &self.names
    }

    #[must_use]
    pub fn controller(&self, player: PlayerId) -> &Controller {
        &self.controllers[player]
    }

    #[must_use]
    pub fn table(&self) -> &TileTable {
        &self.table
    }

    #[must_use]
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// Seat whose turn it is (or was, once the game is over).
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// The active turn, if one has started.
    #[must_use]
    pub fn turn(&self) -> Option<&TurnEngine> {
        self.turn.as_ref()
    }

    /// Number of the turn in progress or about to start, from 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        u32::try_from(self.history.len()).unwrap_or(u32::MAX).saturating_add(1)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Worm totals per seat.
    #[must_use]
    pub fn standings(&self) -> PlayerMap<u32> {
        self.table.stacks().map(|_, stack| stack.worm_total())
    }

    /// Serializable view of the whole game.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let players = self
            .names
            .iter()
            .map(|(id, name)| {
                let stack = self.table.stack(id);
                PlayerSnapshot {
                    id,
                    name: name.clone(),
                    relay: self.controllers[id].is_relay(),
                    tiles: stack.tiles().to_vec(),
                    worms: stack.worm_total(),
                }
            })
            .collect();

        GameSnapshot {
            turn_number: self.turn_number(),
            current_player: self.current,
            players,
            bank: self.table.bank().tiles().to_vec(),
            removed: self.table.removed().to_vec(),
            turn: self.turn.as_ref().map(TurnSnapshot::from_turn),
            result: self.result.clone(),
        }
    }

    // === Driving ===

    /// Run until a turn completes, a relay seat must decide, or the game ends.
    ///
    /// Starts a turn for the current seat if none is active. Strategy
    /// answers outside their documented domain stop the game with
    /// [`GameError::StrategyProtocolViolation`].
    pub fn advance(&mut self) -> Result<Progress, GameError> {
        if let Some(result) = &self.result {
            return Ok(Progress::GameOver(result.clone()));
        }

        loop {
            let current = self.current;
            let turn = self.turn.get_or_insert_with(|| TurnEngine::new(current));

            match turn.kind() {
                PhaseKind::Rolling => {
                    turn.roll(&mut *self.dice, &mut self.table)?;
                }
                PhaseKind::Complete => return self.finish_turn(),
                _ => {
                    if let Some(pending) = self.decide()? {
                        return Ok(Progress::Pending(pending));
                    }
                }
            }
        }
    }

    /// Play one whole turn for a strategy-driven seat.
    ///
    /// Fails with [`GameError::AwaitingExternalDecision`] if a relay seat
    /// has to answer first; the turn stays where it paused.
    pub fn play_turn(&mut self) -> Result<TurnRecord, GameError> {
        match self.advance()? {
            Progress::TurnComplete(record) => Ok(record),
            Progress::Pending(p) => Err(GameError::AwaitingExternalDecision {
                player: p.player,
                decision: p.decision,
            }),
            Progress::GameOver(_) => Err(GameError::GameOver),
        }
    }

    /// Play to the end. The game may stop mid-round once the bank empties.
    pub fn play_game(&mut self) -> Result<GameResult, GameError> {
        loop {
            match self.advance()? {
                Progress::TurnComplete(_) => {}
                Progress::GameOver(result) => return Ok(result),
                Progress::Pending(p) => {
                    return Err(GameError::AwaitingExternalDecision {
                        player: p.player,
                        decision: p.decision,
                    })
                }
            }
        }
    }

    /// Discard the turn in progress.
    ///
    /// Tiles only move when a turn resolves, so nothing needs undoing. The
    /// same seat starts a fresh turn on the next [`advance`](Self::advance).
    /// A resolved turn cannot be abandoned.
    pub fn abandon_turn(&mut self) -> Result<(), GameError> {
        self.check_running()?;
        let turn = self.turn.as_ref().ok_or(GameError::NoTurnInProgress)?;
        if turn.is_complete() {
            return Err(GameError::WrongPhase {
                expected: PhaseKind::Rolling,
                actual: PhaseKind::Complete,
            });
        }
        tracing::info!("{} abandons turn {}", turn.player(), self.turn_number());
        self.turn = None;
        Ok(())
    }

    // === Relay entry points ===
    //
    // Only the active seat's turn can be answered, and only when that seat
    // is a relay. A strategy seat gets `NotRelaySeat`.

    /// Reserve `value` for the active turn.
    pub fn submit_value(&mut self, value: DiceValue) -> Result<TurnPhase, GameError> {
        self.submit(Answer::Value(value))
    }

    /// Answer the continue prompt for the active turn.
    pub fn submit_continue(&mut self, again: bool) -> Result<TurnPhase, GameError> {
        self.submit(Answer::Continue(again))
    }

    /// Pick a tile from the active turn's offer.
    pub fn submit_tile(&mut self, tile: Option<Tile>) -> Result<TurnPhase, GameError> {
        self.submit(Answer::Tile(tile))
    }

    /// Apply a relay answer. A turn it resolves is recorded at once, so a
    /// bank emptied by the answer ends the game before this returns.
    fn submit(&mut self, answer: Answer) -> Result<TurnPhase, GameError> {
        self.check_running()?;
        let turn = self.turn.as_mut().ok_or(GameError::NoTurnInProgress)?;
        let player = turn.player();
        if !self.controllers[player].is_relay() {
            return Err(GameError::NotRelaySeat { player });
        }
        apply(turn, answer, &mut self.table)?;
        let phase = turn.phase().clone();
        if turn.is_complete() {
            self.finish_turn()?;
        }
        Ok(phase)
    }

    /// Ask the current seat's strategy for the pending decision and apply it.
    ///
    /// Returns the decision instead when the seat is a relay.
    fn decide(&mut self) -> Result<Option<PendingDecision>, GameError> {
        let turn_number = self.turn_number();
        let turn = self.turn.as_mut().ok_or(GameError::NoTurnInProgress)?;
        let player = turn.player();
        let decision = match turn.kind() {
            PhaseKind::AwaitingValueChoice => Decision::ChooseDiceValue,
            PhaseKind::AwaitingContinue => Decision::ContinueTurn,
            PhaseKind::AwaitingTileChoice => Decision::ChooseTargetTile,
            actual => {
                return Err(GameError::WrongPhase {
                    expected: PhaseKind::AwaitingValueChoice,
                    actual,
                })
            }
        };
        if decision == Decision::ContinueTurn && turn.state().remaining_dice() == 0 {
            return Err(GameError::IllegalContinue);
        }

        let strategy = match &mut self.controllers[player] {
            Controller::Relay => return Ok(Some(PendingDecision { player, decision })),
            Controller::Strategy(strategy) => strategy,
        };

        let ctx = DecisionContext {
            player,
            names: &self.names,
            table: &self.table,
            turn_number,
            history: &self.history,
        };
        let answer = match (decision, turn.offer()) {
            (Decision::ChooseDiceValue, _) => {
                Answer::Value(strategy.choose_dice_value(turn.state(), &ctx))
            }
            (Decision::ContinueTurn, _) => {
                Answer::Continue(strategy.should_continue_turn(turn.state(), &ctx))
            }
            (Decision::ChooseTargetTile, Some(offer)) => {
                Answer::Tile(strategy.choose_target_tile(offer, &ctx))
            }
            (Decision::ChooseTargetTile, None) => return Err(GameError::NoTurnInProgress),
        };

        if let Err(cause) = apply(turn, answer, &mut self.table) {
            tracing::warn!("{} ({}) rejected on {}: {}", player, strategy.name(), decision, cause);
            return Err(GameError::protocol_violation(player, decision, cause));
        }
        Ok(None)
    }

    /// Record the resolved turn, then end the game or pass to the next seat.
    fn finish_turn(&mut self) -> Result<Progress, GameError> {
        let turn = self.turn.take().ok_or(GameError::NoTurnInProgress)?;
        let Some(&outcome) = turn.outcome() else {
            let actual = turn.kind();
            self.turn = Some(turn);
            return Err(GameError::WrongPhase {
                expected: PhaseKind::Complete,
                actual,
            });
        };
        self.table.check_conservation()?;

        let standings = self.standings();
        let record = TurnRecord::new(self.turn_number(), turn.state(), outcome, standings.clone());
        tracing::info!(
            "turn {}: {} scored {} -> {:?}",
            record.turn_number,
            record.player,
            record.score,
            record.outcome
        );
        self.history.push(record.clone());

        if self.table.bank().is_empty() {
            let result = GameResult::from_worm_totals(&standings);
            tracing::info!("game over after {} turns: {:?}", self.history.len(), result);
            self.result = Some(result);
        } else {
            self.current = self.current.next(self.player_count());
        }
        Ok(Progress::TurnComplete(record))
    }

    fn check_running(&self) -> Result<(), GameError> {
        if self.result.is_some() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("names", &self.names)
            .field("controllers", &self.controllers)
            .field("current", &self.current)
            .field("turn", &self.turn)
            .field("turns_played", &self.history.len())
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

fn apply(
    turn: &mut TurnEngine,
    answer: Answer,
    table: &mut TileTable,
) -> Result<PhaseKind, GameError> {
    match answer {
        Answer::Value(value) => turn.reserve(value, table),
        Answer::Continue(again) => turn.decide_continue(again, table),
        Answer::Tile(tile) => turn.claim_tile(tile, table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiceValue::*, LoadedDice};
    use crate::game::GameBuilder;
    use crate::rules::TileOffer;
    use crate::strategy::{Conservative, Targeted};
    use crate::turn::TurnState;

    /// Always answers the same face, legal or not.
    struct Stubborn(DiceValue);

    impl Strategy for Stubborn {
        fn name(&self) -> &str {
            "Stubborn"
        }
        fn choose_dice_value(&mut self, _: &TurnState, _: &DecisionContext<'_>) -> DiceValue {
            self.0
        }
        fn should_continue_turn(&mut self, _: &TurnState, _: &DecisionContext<'_>) -> bool {
            false
        }
        fn choose_target_tile(&mut self, _: &TileOffer, _: &DecisionContext<'_>) -> Option<Tile> {
            None
        }
    }

    #[test]
    fn test_strategy_turn_completes_and_rotates() {
        let mut game = GameBuilder::new()
            .player("Alice", Box::new(Conservative))
            .player("Bob", Box::new(Conservative))
            .dice(LoadedDice::new([Worm, Worm, Worm, Worm, Worm, One, One, One]))
            .build()
            .unwrap();

        let record = game.play_turn().unwrap();

        // worm x5 = 25, conservative stops and takes the lowest tile
        assert_eq!(record.player, PlayerId::new(0));
        assert_eq!(record.score, 25);
        assert_eq!(record.outcome.tile().map(|t| t.value()), Some(21));
        assert_eq!(game.current_player(), PlayerId::new(1));
        assert_eq!(game.standings()[PlayerId::new(0)], 1);
        assert_eq!(game.turn_number(), 2);
        assert!(game.turn().is_none());
    }

    #[test]
    fn test_illegal_strategy_answer_is_protocol_violation() {
        let mut game = GameBuilder::new()
            .player("Mule", Box::new(Stubborn(Three)))
            .dice(LoadedDice::new([Worm, Worm, One, One, Two, Two, Five, Five]))
            .build()
            .unwrap();

        let err = game.advance().unwrap_err();
        match err {
            GameError::StrategyProtocolViolation { player, decision, source } => {
                assert_eq!(player, PlayerId::new(0));
                assert_eq!(decision, Decision::ChooseDiceValue);
                assert_eq!(*source, GameError::InvalidReservation { value: Three });
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(game.turn().map(|t| t.kind()), Some(PhaseKind::AwaitingValueChoice));
    }

    #[test]
    fn test_declining_an_eligible_tile_is_protocol_violation() {
        let mut game = GameBuilder::new()
            .player("Mule", Box::new(Stubborn(Worm)))
            .dice(LoadedDice::new([Worm; 8]))
            .build()
            .unwrap();

        let err = game.advance().unwrap_err();
        assert!(matches!(
            err,
            GameError::StrategyProtocolViolation {
                decision: Decision::ChooseTargetTile,
                ..
            }
        ));
        assert_eq!(game.table().bank().len(), 16);
    }

    #[test]
    fn test_relay_pauses_and_resumes() {
        let mut game = GameBuilder::new()
            .relay_player("Human")
            .player("Bot", Box::new(Targeted::default()))
            .dice(LoadedDice::new([Worm, Worm, Worm, Five, Five, Five, Two, One]))
            .build()
            .unwrap();

        let pending = game.advance().unwrap();
        assert_eq!(
            pending,
            Progress::Pending(PendingDecision {
                player: PlayerId::new(0),
                decision: Decision::ChooseDiceValue
            })
        );
        assert!(matches!(
            game.play_turn(),
            Err(GameError::AwaitingExternalDecision { .. })
        ));

        // a bad relay answer is reported as-is and leaves the turn paused
        assert_eq!(
            game.submit_value(Three),
            Err(GameError::InvalidReservation { value: Three })
        );
        assert_eq!(game.submit_value(Worm).unwrap().kind(), PhaseKind::AwaitingContinue);
        assert_eq!(game.submit_continue(true).unwrap(), TurnPhase::Rolling);
        assert!(matches!(
            game.submit_tile(None),
            Err(GameError::WrongPhase { .. })
        ));
    }

    #[test]
    fn test_abandon_turn_keeps_seat() {
        let mut game = GameBuilder::new()
            .relay_player("Human")
            .relay_player("Other")
            .dice(LoadedDice::new([Worm, Worm, Worm, Five, Five, Five, Two, One]))
            .build()
            .unwrap();

        assert!(matches!(game.abandon_turn(), Err(GameError::NoTurnInProgress)));
        game.advance().unwrap();
        game.submit_value(Worm).unwrap();
        let before = game.snapshot();

        game.abandon_turn().unwrap();

        assert!(game.turn().is_none());
        assert_eq!(game.current_player(), PlayerId::new(0));
        assert_eq!(game.table().bank().len(), 16);
        assert_eq!(game.snapshot().bank, before.bank);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_strategy_seat_refuses_relay_answers() {
        let mut game = GameBuilder::new()
            .player("Bot", Box::new(Stubborn(Three)))
            .dice(LoadedDice::new([Worm, Worm, One, One, Two, Two, Five, Five]))
            .build()
            .unwrap();

        assert!(game.advance().is_err());
        assert_eq!(
            game.submit_value(Worm),
            Err(GameError::NotRelaySeat {
                player: PlayerId::new(0)
            })
        );
        assert_eq!(game.turn().map(|t| t.kind()), Some(PhaseKind::AwaitingValueChoice));
        assert!(game.turn().is_some_and(|t| t.state().reserved().is_empty()));
    }

    #[test]
    fn test_relay_answer_that_resolves_records_the_turn() {
        let mut game = GameBuilder::new()
            .relay_player("Human")
            .relay_player("Other")
            .dice(LoadedDice::new([Worm, Worm, Worm, Worm, Worm, One, One, One]))
            .build()
            .unwrap();

        game.advance().unwrap();
        game.submit_value(Worm).unwrap();
        game.submit_continue(false).unwrap();
        let phase = game.submit_tile(Some(Tile::new(25).unwrap())).unwrap();

        assert_eq!(phase.kind(), PhaseKind::Complete);
        assert!(game.turn().is_none());
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history().last().map(|t| t.score), Some(25));
        assert_eq!(game.current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_submit_without_turn() {
        let mut game = GameBuilder::new().relay_player("Human").build().unwrap();
        assert_eq!(game.submit_continue(false), Err(GameError::NoTurnInProgress));
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<GameEngine>();
    }
}
