//! One player's turn, as a resumable state machine.
//!
//! - [`TurnState`]: dice rolled and reserved so far
//! - [`TurnEngine`]: validates each decision and applies it
//! - [`TurnOutcome`]: how the turn ended, with tile effects already applied

mod engine;
mod outcome;
mod state;

pub use engine::{PhaseKind, TurnEngine, TurnPhase};
pub use outcome::{BustReason, TurnOutcome};
pub use state::TurnState;
