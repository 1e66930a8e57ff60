//! Core value types: dice, tiles, players, RNG, configuration, errors.
//!
//! Nothing in `core` knows about strategies or the game loop. The only
//! upward reference is [`crate::turn::PhaseKind`], named by
//! [`GameError::WrongPhase`].

pub mod config;
pub mod dice;
pub mod error;
pub mod player;
pub mod rng;
pub mod tile;

pub use config::GameConfig;
pub use dice::{count_face, distinct_faces, DiceRoll, DiceValue, DICE_PER_TURN};
pub use error::{Decision, GameError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{DiceSource, GameRng, LoadedDice};
pub use tile::{Tile, MAX_TILE_VALUE, MIN_TILE_VALUE, TILE_COUNT};
