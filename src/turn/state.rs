//! The mutable record of one turn in progress.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{count_face, DiceRoll, DiceValue, GameError, PlayerId, DICE_PER_TURN};
use crate::rules::legal_values;

/// Dice thrown and set aside during a single turn.
///
/// Created when a turn starts and dropped when it resolves; nothing in it
/// outlives the turn. `remaining_dice` plus every reserved count always adds
/// up to [`DICE_PER_TURN`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    player: PlayerId,
    current_roll: DiceRoll,
    /// Reserved faces with their counts, in reservation order. A face
    /// appears at most once.
    reserved: SmallVec<[(DiceValue, u8); 6]>,
    remaining_dice: u8,
    /// Every roll thrown this turn, oldest first.
    rolls: Vec<DiceRoll>,
}

impl TurnState {
    /// A fresh turn for `player`: eight dice in hand, nothing reserved.
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            current_roll: DiceRoll::new(),
            reserved: SmallVec::new(),
            remaining_dice: DICE_PER_TURN,
            rolls: Vec::new(),
        }
    }

    /// Rebuild a turn from its visible parts, e.g. from a client's view.
    ///
    /// `reserved` must not repeat a face, and the reserved dice plus the
    /// dice on the table must not exceed eight.
    pub fn resume(
        player: PlayerId,
        reserved: &[(DiceValue, u8)],
        current_roll: &[DiceValue],
    ) -> Result<Self, GameError> {
        let mut state = Self::new(player);
        for &(value, count) in reserved {
            if state.reserved_count(value) > 0 || count == 0 {
                return Err(GameError::InvalidReservation { value });
            }
            if count > state.remaining_dice {
                return Err(GameError::InvalidConfig(format!(
                    "{} dice reserved, only {} in a turn",
                    DICE_PER_TURN - state.remaining_dice + count,
                    DICE_PER_TURN
                )));
            }
            state.reserved.push((value, count));
            state.remaining_dice -= count;
        }
        if current_roll.len() > usize::from(state.remaining_dice) {
            return Err(GameError::InvalidConfig(format!(
                "roll of {} dice with only {} remaining",
                current_roll.len(),
                state.remaining_dice
            )));
        }
        state.current_roll = DiceRoll::from_slice(current_roll);
        Ok(state)
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn current_roll(&self) -> &[DiceValue] {
        &self.current_roll
    }

    /// Reserved faces and counts, in the order they were set aside.
    #[must_use]
    pub fn reserved(&self) -> &[(DiceValue, u8)] {
        &self.reserved
    }

    #[must_use]
    pub fn reserved_values(&self) -> SmallVec<[DiceValue; 6]> {
        self.reserved.iter().map(|&(v, _)| v).collect()
    }

    /// Dice set aside showing `value` (zero if not reserved).
    #[must_use]
    pub fn reserved_count(&self, value: DiceValue) -> u8 {
        self.reserved
            .iter()
            .find(|&&(v, _)| v == value)
            .map_or(0, |&(_, c)| c)
    }

    /// Total dice set aside so far.
    #[must_use]
    pub fn reserved_dice(&self) -> u8 {
        self.reserved.iter().map(|&(_, c)| c).sum()
    }

    #[must_use]
    pub fn remaining_dice(&self) -> u8 {
        self.remaining_dice
    }

    /// Sum of point values over reserved dice. Worms count 5.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.reserved
            .iter()
            .map(|&(v, c)| u32::from(c) * v.points())
            .sum()
    }

    #[must_use]
    pub fn has_worm(&self) -> bool {
        self.reserved.iter().any(|&(v, _)| v.is_worm())
    }

    /// Faces in the current roll that may still be reserved.
    #[must_use]
    pub fn legal_values(&self) -> SmallVec<[DiceValue; 6]> {
        legal_values(&self.current_roll, &self.reserved_values())
    }

    #[must_use]
    pub fn can_reserve(&self, value: DiceValue) -> bool {
        self.current_roll.contains(&value) && self.reserved_count(value) == 0
    }

    /// How many dice in the current roll show `value`.
    #[must_use]
    pub fn count_in_roll(&self, value: DiceValue) -> u8 {
        count_face(&self.current_roll, value)
    }

    /// Legal faces paired with how many dice each would set aside, in the
    /// order each face first shows up in the roll.
    #[must_use]
    pub fn reservable(&self) -> SmallVec<[(DiceValue, u8); 6]> {
        let mut out: SmallVec<[(DiceValue, u8); 6]> = SmallVec::new();
        for &face in &self.current_roll {
            if self.reserved_count(face) == 0 && !out.iter().any(|&(v, _)| v == face) {
                out.push((face, self.count_in_roll(face)));
            }
        }
        out
    }

    /// Every roll thrown this turn.
    #[must_use]
    pub fn rolls(&self) -> &[DiceRoll] {
        &self.rolls
    }

    pub(crate) fn record_roll(&mut self, roll: DiceRoll) {
        self.rolls.push(roll.clone());
        self.current_roll = roll;
    }

    /// Set aside every die in the current roll showing `value`.
    ///
    /// Returns the number of dice moved. Nothing changes on error.
    pub(crate) fn reserve(&mut self, value: DiceValue) -> Result<u8, GameError> {
        if !self.can_reserve(value) {
            return Err(GameError::InvalidReservation { value });
        }
        let moved = self.count_in_roll(value);
        self.current_roll.retain(|d| *d != value);
        self.reserved.push((value, moved));
        self.remaining_dice -= moved;
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DiceValue::*;

    fn rolled(faces: &[DiceValue]) -> TurnState {
        let mut state = TurnState::new(PlayerId::new(0));
        state.record_roll(DiceRoll::from_slice(faces));
        state
    }

    #[test]
    fn test_initial_state() {
        let state = TurnState::new(PlayerId::new(2));
        assert_eq!(state.remaining_dice(), 8);
        assert_eq!(state.score(), 0);
        assert!(!state.has_worm());
        assert!(state.reserved().is_empty());
    }

    #[test]
    fn test_reserve_moves_all_matching_dice() {
        let mut state = rolled(&[One, One, One, Five, Five, Worm, Worm, Worm]);

        assert_eq!(state.reserve(Worm), Ok(3));
        assert_eq!(state.score(), 15);
        assert!(state.has_worm());
        assert_eq!(state.remaining_dice(), 5);
        assert_eq!(state.current_roll(), &[One, One, One, Five, Five]);
        assert_eq!(state.remaining_dice() + state.reserved_dice(), 8);
    }

    #[test]
    fn test_cannot_reserve_twice_or_absent() {
        let mut state = rolled(&[Two, Two, Worm]);
        state.reserve(Two).unwrap();

        state.record_roll(DiceRoll::from_slice(&[Two, Four, Four, Four, Four, Four]));
        assert_eq!(state.reserve(Two), Err(GameError::InvalidReservation { value: Two }));
        assert_eq!(state.reserve(Worm), Err(GameError::InvalidReservation { value: Worm }));
        assert_eq!(state.reserved_dice(), 2);
        assert_eq!(state.legal_values().as_slice(), &[Four]);
    }

    #[test]
    fn test_score_counts_worm_as_five() {
        let state = TurnState::resume(PlayerId::new(0), &[(Five, 2), (Worm, 2)], &[]).unwrap();
        assert_eq!(state.score(), 20);
        assert_eq!(state.reserved_count(Five), 2);
        assert_eq!(state.reserved_count(Worm), 2);
    }

    #[test]
    fn test_reservable_counts() {
        let roll = [Three, Worm, Three, One];
        let state = TurnState::resume(PlayerId::new(0), &[(Worm, 1)], &roll).unwrap();
        assert_eq!(state.reservable().as_slice(), &[(Three, 2), (One, 1)]);
    }

    #[test]
    fn test_resume_rejects_bad_parts() {
        let p = PlayerId::new(0);
        assert!(TurnState::resume(p, &[(Two, 1), (Two, 1)], &[]).is_err());
        assert!(TurnState::resume(p, &[(Two, 5), (Three, 4)], &[]).is_err());
        assert!(TurnState::resume(p, &[(Two, 5)], &[One, One, One, One]).is_err());
        assert!(TurnState::resume(p, &[(Two, 5)], &[One, One, One]).is_ok());
    }

    #[test]
    fn test_rolls_history() {
        let mut state = rolled(&[Worm; 8]);
        state.reserve(Worm).unwrap();
        assert_eq!(state.rolls().len(), 1);
        assert_eq!(state.remaining_dice(), 0);
    }
}
