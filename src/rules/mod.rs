//! Pure rule helpers: which faces may be reserved, which tiles may be
//! claimed, and how a finished game is ranked.
//!
//! Nothing here mutates state. The turn engine calls into these helpers,
//! and strategies may call them to reason about a position.

mod legality;
mod result;

pub use legality::{legal_values, TileOffer, TileSource};
pub use result::GameResult;
