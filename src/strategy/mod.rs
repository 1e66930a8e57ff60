//! Decision-making for automated players.
//!
//! A [`Strategy`] answers the three decision points of a turn. Strategies
//! never touch game state: they receive read-only views and return a
//! choice, which the engine validates before applying.
//!
//! - [`Conservative`], [`Aggressive`], [`Balanced`], [`Targeted`]: fixed heuristics
//! - [`Randomized`]: uniform legal choices from a seeded RNG
//! - [`Optimal`]: thresholds and weights tuned by simulation
//!
//! [`StrategyKind`] names each one in serializable form and builds it.

mod heuristic;
mod optimal;
mod random;

pub use heuristic::{Aggressive, Balanced, Conservative, Targeted};
pub use optimal::Optimal;
pub use random::Randomized;

use serde::{Deserialize, Serialize};

use crate::core::{DiceValue, PlayerId, PlayerMap, Tile};
use crate::game::GameHistory;
use crate::rules::TileOffer;
use crate::tiles::TileTable;
use crate::turn::TurnState;

/// Lowest tile value; the usual "can take a tile" threshold.
pub(crate) const TAKE_THRESHOLD: u32 = 21;

/// The contract every automated player satisfies.
///
/// Each method must return a value inside its documented domain. The engine
/// treats anything else as a fault in the strategy and stops the game.
pub trait Strategy: Send {
    /// Display name, e.g. for logs.
    fn name(&self) -> &str;

    /// Pick a face to reserve. Must be one of `turn.legal_values()`, which
    /// is never empty when this is called.
    fn choose_dice_value(&mut self, turn: &TurnState, ctx: &DecisionContext<'_>) -> DiceValue;

    /// Roll again? Only asked while dice remain.
    fn should_continue_turn(&mut self, turn: &TurnState, ctx: &DecisionContext<'_>) -> bool;

    /// Pick a tile from `offer`. Only asked when the offer is eligible, and
    /// the answer must be one of its candidates.
    fn choose_target_tile(&mut self, offer: &TileOffer, ctx: &DecisionContext<'_>) -> Option<Tile>;
}

/// Read-only view of the game around a decision.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    /// The deciding player.
    pub player: PlayerId,
    pub names: &'a PlayerMap<String>,
    pub table: &'a TileTable,
    /// 1-based turn counter across all players.
    pub turn_number: u32,
    pub history: &'a GameHistory,
}

impl<'a> DecisionContext<'a> {
    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> &'a str {
        let names: &'a PlayerMap<String> = self.names;
        &names[player]
    }

    /// Seat of the player with this name.
    #[must_use]
    pub fn player_named(&self, name: &str) -> Option<PlayerId> {
        self.names.iter().find(|(_, n)| n.as_str() == name).map(|(p, _)| p)
    }

    #[must_use]
    pub fn own_worms(&self) -> u32 {
        self.table.worm_total(self.player)
    }

    /// Every other player's worm total.
    pub fn opponent_worms(&self) -> impl Iterator<Item = (PlayerId, u32)> + 'a {
        let me = self.player;
        let table = self.table;
        table
            .stacks()
            .player_ids()
            .filter(move |p| *p != me)
            .map(move |p| (p, table.worm_total(p)))
    }

    /// Best opponent worm total, 0 when playing alone.
    #[must_use]
    pub fn max_opponent_worms(&self) -> u32 {
        self.opponent_worms().map(|(_, w)| w).max().unwrap_or(0)
    }

    /// Whether no opponent has more worms. Ties count as leading.
    #[must_use]
    pub fn is_leading(&self) -> bool {
        self.own_worms() >= self.max_opponent_worms()
    }
}

/// Serializable name of a built-in strategy, with its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StrategyKind {
    Conservative,
    Aggressive,
    Balanced,
    Targeted {
        target_player: Option<String>,
        min_target_value: u8,
    },
    Randomized {
        continue_probability: f64,
    },
    Optimal,
}

impl StrategyKind {
    /// Construct the strategy. `seed` feeds the randomized strategy and is
    /// ignored by the others.
    #[must_use]
    pub fn build(&self, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Conservative => Box::new(Conservative),
            StrategyKind::Aggressive => Box::new(Aggressive),
            StrategyKind::Balanced => Box::new(Balanced),
            StrategyKind::Targeted {
                target_player,
                min_target_value,
            } => Box::new(Targeted::new(target_player.clone(), *min_target_value)),
            StrategyKind::Randomized {
                continue_probability,
            } => Box::new(Randomized::new(seed, *continue_probability)),
            StrategyKind::Optimal => Box::new(Optimal),
        }
    }

    /// Every built-in strategy with default parameters.
    #[must_use]
    pub fn all() -> Vec<StrategyKind> {
        vec![
            StrategyKind::Conservative,
            StrategyKind::Aggressive,
            StrategyKind::Balanced,
            StrategyKind::Targeted {
                target_player: None,
                min_target_value: Targeted::DEFAULT_MIN_TARGET,
            },
            StrategyKind::Randomized {
                continue_probability: Randomized::DEFAULT_CONTINUE_PROBABILITY,
            },
            StrategyKind::Optimal,
        ]
    }
}

/// Item with the greatest key. Ties go to the earliest item.
pub(crate) fn first_max_by_key<T, K: PartialOrd>(
    items: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> Option<T> {
    let mut best: Option<(T, K)> = None;
    for item in items {
        let k = key(&item);
        if best.as_ref().map_or(true, |(_, top)| k > *top) {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

/// Most frequent legal face. Ties go to the face rolled first.
///
/// Falls back to `Worm` on an empty legal set, which the engine never asks
/// about and would reject.
pub(crate) fn most_frequent(turn: &TurnState) -> DiceValue {
    first_max_by_key(turn.reservable(), |&(_, count)| count).map_or(DiceValue::Worm, |(v, _)| v)
}

/// First legal face in `order`.
pub(crate) fn first_of(turn: &TurnState, order: &[DiceValue]) -> Option<DiceValue> {
    let legal = turn.legal_values();
    order.iter().copied().find(|v| legal.contains(v))
}

/// Whether stopping now would qualify for a tile.
pub(crate) fn can_take(turn: &TurnState) -> bool {
    turn.score() >= TAKE_THRESHOLD && turn.has_worm()
}
