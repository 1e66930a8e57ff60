//! Whole-game progression.
//!
//! - [`GameBuilder`]: seats, strategies, dice and config
//! - [`GameEngine`]: rotation, strategy calls, relay pauses, game end
//! - [`GameHistory`]: completed turns and per-player statistics
//! - [`GameSnapshot`]: serializable view for clients

mod builder;
mod engine;
mod history;
mod snapshot;

pub use builder::GameBuilder;
pub use engine::{Controller, GameEngine, PendingDecision, Progress};
pub use history::{GameHistory, PlayerStatistics, TurnRecord};
pub use snapshot::{GameSnapshot, PlayerSnapshot, TurnSnapshot};
