//! Dice faces and rolls.
//!
//! A Pikomino die has six faces: the numerals one to five and the worm.
//! The worm is worth 5 points like the five, but it is a distinct face and
//! the only one that unlocks tile claims.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of dice a player starts every turn with.
pub const DICE_PER_TURN: u8 = 8;

/// One face of a die.
///
/// Ordering follows the printed faces, with `Worm` last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiceValue {
    One,
    Two,
    Three,
    Four,
    Five,
    Worm,
}

impl DiceValue {
    /// All six faces, in face order.
    pub const ALL: [DiceValue; 6] = [
        DiceValue::One,
        DiceValue::Two,
        DiceValue::Three,
        DiceValue::Four,
        DiceValue::Five,
        DiceValue::Worm,
    ];

    /// Point value of the face. The worm counts as 5.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            DiceValue::One => 1,
            DiceValue::Two => 2,
            DiceValue::Three => 3,
            DiceValue::Four => 4,
            DiceValue::Five | DiceValue::Worm => 5,
        }
    }

    /// Whether this face carries the worm required to claim a tile.
    #[must_use]
    pub const fn is_worm(self) -> bool {
        matches!(self, DiceValue::Worm)
    }
}

impl std::fmt::Display for DiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiceValue::Worm => write!(f, "W"),
            other => write!(f, "{}", other.points()),
        }
    }
}

/// The faces showing after one throw.
///
/// Never holds more than [`DICE_PER_TURN`] dice, so it stays on the stack.
pub type DiceRoll = SmallVec<[DiceValue; 8]>;

/// Count how many dice in `roll` show `value`.
#[must_use]
pub fn count_face(roll: &[DiceValue], value: DiceValue) -> u8 {
    roll.iter().filter(|&&d| d == value).count() as u8
}

/// Distinct faces present in `roll`, in face order.
#[must_use]
pub fn distinct_faces(roll: &[DiceValue]) -> SmallVec<[DiceValue; 6]> {
    DiceValue::ALL
        .iter()
        .copied()
        .filter(|face| roll.contains(face))
        .collect()
}
