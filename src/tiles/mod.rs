//! Tile locations: the bank, per-player stacks, and the ledger tying them
//! together.
//!
//! - [`TileBank`]: unclaimed tiles in the center
//! - [`PlayerTileStack`]: one player's LIFO pile
//! - [`TileTable`]: all locations plus the removed pile, with atomic moves

mod bank;
mod stack;
mod table;

pub use bank::TileBank;
pub use stack::PlayerTileStack;
pub use table::{BustPenalty, StealCandidate, TileLocation, TileTable};
