//! # rust-pikomino
//!
//! Turn and game engine for the Pikomino dice-and-tile game, for automated
//! strategies and human-driven sessions alike.
//!
//! ## Design Principles
//!
//! 1. **Resumable turns**: A turn is a state machine stepped one decision at
//!    a time, so the same engine runs whole simulated games and pauses for an
//!    interactive player after every roll.
//!
//! 2. **Fail fast**: Every decision is validated before it is applied. An
//!    illegal answer is an error, never coerced into a legal one.
//!
//! 3. **Atomic moves**: Tiles change hands only through the [`TileTable`],
//!    one validated move at a time. Conservation of the sixteen tiles is
//!    checked after every turn.
//!
//! 4. **Seeded randomness**: Dice come from an injected [`DiceSource`]; a
//!    seed and a seat list replay the same game.
//!
//! ## Modules
//!
//! - `core`: Dice, tiles, players, RNG, configuration, errors
//! - `tiles`: Bank, player stacks and the ownership ledger
//! - `rules`: Legal reservations, tile offers, final ranking
//! - `turn`: The turn state machine
//! - `strategy`: The decision contract and built-in strategies
//! - `game`: Builder, game loop, history and snapshots

pub mod core;
pub mod game;
pub mod rules;
pub mod strategy;
pub mod tiles;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Decision, DiceRoll, DiceSource, DiceValue, GameConfig, GameError, GameRng, LoadedDice, PlayerId,
    PlayerMap, Tile,
};

pub use crate::tiles::{PlayerTileStack, TileBank, TileLocation, TileTable};

pub use crate::rules::{GameResult, TileOffer, TileSource};

pub use crate::turn::{BustReason, PhaseKind, TurnEngine, TurnOutcome, TurnPhase, TurnState};

pub use crate::strategy::{
    Aggressive, Balanced, Conservative, DecisionContext, Optimal, Randomized, Strategy,
    StrategyKind, Targeted,
};

pub use crate::game::{
    Controller, GameBuilder, GameEngine, GameHistory, GameSnapshot, PendingDecision, Progress,
    TurnRecord,
};
