use super::{can_take, DecisionContext, Strategy};
use crate::core::{DiceValue, GameRng, Tile};
use crate::rules::TileOffer;
use crate::turn::TurnState;

/// Uniformly random legal choices.
///
/// Keeps rolling while it cannot yet take a tile; past that point it rolls
/// again with probability `continue_probability`. All draws come from its
/// own seeded [`GameRng`], so a game replays exactly from its seed.
#[derive(Clone, Debug)]
pub struct Randomized {
    rng: GameRng,
    continue_probability: f64,
}

impl Randomized {
    pub const DEFAULT_CONTINUE_PROBABILITY: f64 = 0.5;

    /// `continue_probability` is clamped to `0.0..=1.0`. NaN falls back to
    /// [`Self::DEFAULT_CONTINUE_PROBABILITY`].
    #[must_use]
    pub fn new(seed: u64, continue_probability: f64) -> Self {
        let continue_probability = if continue_probability.is_nan() {
            Self::DEFAULT_CONTINUE_PROBABILITY
        } else {
            continue_probability.clamp(0.0, 1.0)
        };
        Self {
            rng: GameRng::new(seed),
            continue_probability,
        }
    }

    #[must_use]
    pub fn continue_probability(&self) -> f64 {
        self.continue_probability
    }
}

impl Strategy for Randomized {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_dice_value(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> DiceValue {
        let legal = turn.legal_values();
        self.rng.choose(legal.as_slice()).copied().unwrap_or(DiceValue::Worm)
    }

    fn should_continue_turn(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> bool {
        if turn.remaining_dice() == 0 {
            return false;
        }
        if !can_take(turn) {
            return true;
        }
        self.rng.gen_bool(self.continue_probability)
    }

    fn choose_target_tile(
        &mut self,
        offer: &TileOffer,
        _ctx: &DecisionContext<'_>,
    ) -> Option<Tile> {
        if !offer.has_worm {
            return None;
        }
        let options: Vec<Tile> = offer.candidates().collect();
        self.rng.choose(&options).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{tile, Seat};
    use super::*;
    use crate::core::{DiceValue::*, PlayerId};

    #[test]
    fn test_choices_stay_legal() {
        let seat = Seat::new(&["A", "B"]);
        let ctx = seat.ctx(0);
        let mut s = Randomized::new(3, 0.5);
        let roll = [One, Four, Worm, Worm, Two, One];
        let turn = TurnState::resume(PlayerId::new(0), &[(Four, 2)], &roll).unwrap();

        for _ in 0..50 {
            let v = s.choose_dice_value(&turn, &ctx);
            assert!(turn.can_reserve(v), "{v} is not reservable");
        }
    }

    #[test]
    fn test_must_continue_until_able() {
        let seat = Seat::new(&["A"]);
        let ctx = seat.ctx(0);
        let mut never = Randomized::new(3, 0.0);

        let short = TurnState::resume(PlayerId::new(0), &[(Worm, 2), (Five, 1)], &[]).unwrap();
        assert!(never.should_continue_turn(&short, &ctx));

        let able = TurnState::resume(PlayerId::new(0), &[(Worm, 3), (Five, 2)], &[]).unwrap();
        assert!(!never.should_continue_turn(&able, &ctx));
        assert!(Randomized::new(3, 1.0).should_continue_turn(&able, &ctx));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let seat = Seat::new(&["A", "B"]);
        let ctx = seat.ctx(0);
        let offer = TileOffer {
            score: 30,
            has_worm: true,
            center: (21..=30).map(tile).collect(),
            stealable: Vec::new(),
        };

        let mut a = Randomized::new(11, 0.5);
        let mut b = Randomized::new(11, 0.5);
        let picks_a: Vec<_> = (0..10).map(|_| a.choose_target_tile(&offer, &ctx)).collect();
        let picks_b: Vec<_> = (0..10).map(|_| b.choose_target_tile(&offer, &ctx)).collect();

        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|t| t.is_some_and(|t| offer.source_of(t).is_some())));
    }

    #[test]
    fn test_probability_clamped() {
        assert_eq!(Randomized::new(0, 2.0).continue_probability(), 1.0);
        assert_eq!(Randomized::new(0, -1.0).continue_probability(), 0.0);
        assert_eq!(Randomized::new(0, f64::INFINITY).continue_probability(), 1.0);
    }

    #[test]
    fn test_nan_probability_uses_default() {
        let seat = Seat::new(&["A"]);
        let ctx = seat.ctx(0);
        let mut s = Randomized::new(1, f64::NAN);
        assert_eq!(s.continue_probability(), Randomized::DEFAULT_CONTINUE_PROBABILITY);

        // able to take with one die left: the coin flip runs without panicking
        let able = TurnState::resume(PlayerId::new(0), &[(Worm, 3), (Five, 2), (Two, 2)], &[]);
        let able = able.unwrap();
        for _ in 0..20 {
            s.should_continue_turn(&able, &ctx);
        }
    }
}
