//! Fixed-rule strategies.

use super::{can_take, first_max_by_key, first_of, most_frequent, DecisionContext, Strategy};
use crate::core::{DiceValue, Tile};
use crate::rules::TileOffer;
use crate::turn::TurnState;

/// Highest-worm stealable tile.
fn richest_steal(offer: &TileOffer) -> Option<Tile> {
    first_max_by_key(offer.stealable.iter().map(|c| c.tile), |t| t.worms())
}

// =============================================================================
// Conservative
// =============================================================================

/// Stops as soon as a tile is within reach.
#[derive(Clone, Debug, Default)]
pub struct Conservative;

impl Strategy for Conservative {
    fn name(&self) -> &str {
        "Conservative"
    }

    fn choose_dice_value(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> DiceValue {
        if !turn.has_worm() && turn.can_reserve(DiceValue::Worm) {
            return DiceValue::Worm;
        }
        most_frequent(turn)
    }

    fn should_continue_turn(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> bool {
        !can_take(turn)
    }

    /// Lowest center tile; steals only when the center has nothing, and
    /// then the tile with the fewest worms.
    fn choose_target_tile(
        &mut self,
        offer: &TileOffer,
        _ctx: &DecisionContext<'_>,
    ) -> Option<Tile> {
        if !offer.has_worm {
            return None;
        }
        offer.center.iter().copied().min().or_else(|| {
            offer
                .stealable
                .iter()
                .map(|c| c.tile)
                .min_by_key(|t| t.worms())
        })
    }
}

// =============================================================================
// Aggressive
// =============================================================================

/// Chases high scores and prefers stealing.
#[derive(Clone, Debug, Default)]
pub struct Aggressive;

impl Aggressive {
    const PRIORITY: [DiceValue; 6] = [
        DiceValue::Worm,
        DiceValue::Five,
        DiceValue::Four,
        DiceValue::Three,
        DiceValue::Two,
        DiceValue::One,
    ];
    const STOP_AT: u32 = 30;
}

impl Strategy for Aggressive {
    fn name(&self) -> &str {
        "Aggressive"
    }

    fn choose_dice_value(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> DiceValue {
        first_of(turn, &Self::PRIORITY).unwrap_or(DiceValue::Worm)
    }

    fn should_continue_turn(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> bool {
        turn.score() < Self::STOP_AT && turn.remaining_dice() > 0
    }

    fn choose_target_tile(
        &mut self,
        offer: &TileOffer,
        _ctx: &DecisionContext<'_>,
    ) -> Option<Tile> {
        if !offer.has_worm {
            return None;
        }
        richest_steal(offer).or_else(|| offer.center.iter().copied().max())
    }
}

// =============================================================================
// Balanced
// =============================================================================

/// Weighs face frequency against value and adapts tile choice to the
/// standings.
#[derive(Clone, Debug, Default)]
pub struct Balanced;

impl Strategy for Balanced {
    fn name(&self) -> &str {
        "Balanced"
    }

    fn choose_dice_value(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> DiceValue {
        let remaining = turn.remaining_dice();
        if !turn.has_worm() && remaining > 4 && turn.can_reserve(DiceValue::Worm) {
            return DiceValue::Worm;
        }

        let reservable = turn.reservable();
        if remaining <= 3 {
            let high = first_max_by_key(
                reservable.iter().map(|&(v, _)| v).filter(|v| v.points() >= 4),
                |v| v.points(),
            );
            if let Some(value) = high {
                return value;
            }
        }

        first_max_by_key(reservable, |&(v, count)| u32::from(count) * v.points())
            .map_or(DiceValue::Worm, |(v, _)| v)
    }

    fn should_continue_turn(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> bool {
        let remaining = turn.remaining_dice();
        if can_take(turn) && remaining <= 2 {
            return false;
        }
        if remaining >= 4 && turn.score() < 28 {
            return true;
        }
        !can_take(turn)
    }

    /// Behind: steal the richest tile. Ahead: the median center tile.
    /// Otherwise the most worms, with a one-worm bonus for stealing.
    fn choose_target_tile(&mut self, offer: &TileOffer, ctx: &DecisionContext<'_>) -> Option<Tile> {
        if !offer.has_worm {
            return None;
        }
        let own = ctx.own_worms();
        let best_opponent = ctx.max_opponent_worms();

        if own < best_opponent {
            if let Some(tile) = richest_steal(offer) {
                return Some(tile);
            }
        }
        if own > best_opponent && !offer.center.is_empty() {
            return Some(offer.center[offer.center.len() / 2]);
        }

        let center = offer.center.iter().map(|&t| (t, t.worms()));
        let steals = offer.stealable.iter().map(|c| (c.tile, c.tile.worms() + 1));
        first_max_by_key(center.chain(steals), |&(_, value)| value).map(|(t, _)| t)
    }
}

// =============================================================================
// Targeted
// =============================================================================

/// Aims at a named opponent or at tiles of a minimum value.
#[derive(Clone, Debug)]
pub struct Targeted {
    target_player: Option<String>,
    min_target_value: u8,
}

impl Targeted {
    pub const DEFAULT_MIN_TARGET: u8 = 25;

    #[must_use]
    pub fn new(target_player: Option<String>, min_target_value: u8) -> Self {
        Self {
            target_player,
            min_target_value,
        }
    }

    fn below_target(&self, turn: &TurnState) -> bool {
        turn.score() < u32::from(self.min_target_value)
    }
}

impl Default for Targeted {
    fn default() -> Self {
        Self::new(None, Self::DEFAULT_MIN_TARGET)
    }
}

impl Strategy for Targeted {
    fn name(&self) -> &str {
        "Targeted"
    }

    fn choose_dice_value(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> DiceValue {
        if self.below_target(turn) {
            let high = [DiceValue::Worm, DiceValue::Five, DiceValue::Four];
            if let Some(value) = first_of(turn, &high) {
                return value;
            }
        }
        most_frequent(turn)
    }

    fn should_continue_turn(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> bool {
        if self.below_target(turn) && turn.remaining_dice() > 1 {
            return true;
        }
        !can_take(turn)
    }

    fn choose_target_tile(&mut self, offer: &TileOffer, ctx: &DecisionContext<'_>) -> Option<Tile> {
        if !offer.has_worm {
            return None;
        }

        if let Some(victim) = self.target_player.as_deref().and_then(|n| ctx.player_named(n)) {
            if let Some(c) = offer.stealable.iter().find(|c| c.owner == victim) {
                return Some(c.tile);
            }
        }

        let high = offer
            .candidates()
            .filter(|t| t.value() >= self.min_target_value)
            .max();
        high.or_else(|| richest_steal(offer))
            .or_else(|| offer.center.iter().copied().max())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{tile, Seat};
    use super::*;
    use crate::core::{DiceValue::*, PlayerId};
    use crate::tiles::StealCandidate;

    fn turn(reserved: &[(DiceValue, u8)], roll: &[DiceValue]) -> TurnState {
        TurnState::resume(PlayerId::new(0), reserved, roll).unwrap()
    }

    fn offer(score: u32, center: &[u8], stealable: &[(u8, u8)]) -> TileOffer {
        TileOffer {
            score,
            has_worm: true,
            center: center.iter().map(|&v| tile(v)).collect(),
            stealable: stealable
                .iter()
                .map(|&(v, owner)| StealCandidate {
                    tile: tile(v),
                    owner: PlayerId::new(owner),
                })
                .collect(),
        }
    }

    #[test]
    fn test_conservative_takes_worm_then_frequency() {
        let seat = Seat::new(&["A", "B"]);
        let ctx = seat.ctx(0);
        let mut s = Conservative;

        let t = turn(&[], &[Two, Two, Two, Worm, Five, Five, One, One]);
        assert_eq!(s.choose_dice_value(&t, &ctx), Worm);

        let t = turn(&[(Worm, 1)], &[Two, Two, Two, Five, Five, One, One]);
        assert_eq!(s.choose_dice_value(&t, &ctx), Two);
    }

    #[test]
    fn test_conservative_stops_when_able() {
        let seat = Seat::new(&["A", "B"]);
        let ctx = seat.ctx(0);
        let mut s = Conservative;

        assert!(s.should_continue_turn(&turn(&[(Five, 5)], &[]), &ctx));
        assert!(!s.should_continue_turn(&turn(&[(Five, 3), (Worm, 2)], &[]), &ctx));
    }

    #[test]
    fn test_conservative_prefers_lowest_center() {
        let seat = Seat::new(&["A", "B"]);
        let ctx = seat.ctx(0);
        let mut s = Conservative;

        let o = offer(25, &[21, 23, 25], &[(25, 1)]);
        assert_eq!(s.choose_target_tile(&o, &ctx), Some(tile(21)));
        assert_eq!(s.choose_target_tile(&offer(25, &[], &[(25, 1)]), &ctx), Some(tile(25)));
    }

    #[test]
    fn test_aggressive_priority_and_threshold() {
        let seat = Seat::new(&["A", "B"]);
        let ctx = seat.ctx(0);
        let mut s = Aggressive;

        let t = turn(&[(Worm, 2)], &[One, One, Four, Five, Five, Two]);
        assert_eq!(s.choose_dice_value(&t, &ctx), Five);
        assert!(s.should_continue_turn(&turn(&[(Worm, 2), (Five, 3)], &[]), &ctx));
        assert!(!s.should_continue_turn(&turn(&[(Worm, 3), (Five, 3)], &[]), &ctx));
    }

    #[test]
    fn test_aggressive_steals_first() {
        let seat = Seat::new(&["A", "B"]);
        let ctx = seat.ctx(0);
        let mut s = Aggressive;

        assert_eq!(s.choose_target_tile(&offer(26, &[21, 26], &[(26, 1)]), &ctx), Some(tile(26)));
        assert_eq!(s.choose_target_tile(&offer(26, &[21, 24], &[]), &ctx), Some(tile(24)));
    }

    #[test]
    fn test_balanced_value_choice() {
        let seat = Seat::new(&["A", "B"]);
        let ctx = seat.ctx(0);
        let mut s = Balanced;

        // plenty of dice: worm first
        let t = turn(&[], &[One, One, One, One, One, Worm, Two, Two]);
        assert_eq!(s.choose_dice_value(&t, &ctx), Worm);

        // few dice: highest face
        let t = turn(&[(Worm, 1), (One, 4)], &[Two, Two, Four]);
        assert_eq!(s.choose_dice_value(&t, &ctx), Four);

        // middle: count x points, 3x3 beats 1x5
        let t = turn(&[(Worm, 2), (Two, 2)], &[Three, Three, Three, Five]);
        assert_eq!(s.choose_dice_value(&t, &ctx), Three);
    }

    #[test]
    fn test_balanced_continue() {
        let seat = Seat::new(&["A", "B"]);
        let ctx = seat.ctx(0);
        let mut s = Balanced;

        // able to take, two dice left
        assert!(!s.should_continue_turn(&turn(&[(Worm, 3), (Five, 3)], &[]), &ctx));
        // four dice left, score 22
        assert!(s.should_continue_turn(&turn(&[(Worm, 2), (Four, 2)], &[]), &ctx));
        // three dice left, able to take
        assert!(!s.should_continue_turn(&turn(&[(Worm, 3), (Three, 2)], &[]), &ctx));
    }

    #[test]
    fn test_balanced_tile_adapts_to_standings() {
        let mut seat = Seat::new(&["A", "B"]);
        let mut s = Balanced;
        let o = offer(27, &[21, 22, 26], &[(27, 1)]);

        // level: stealing 27 scores 2 + 1 over 26 from the center
        assert_eq!(s.choose_target_tile(&o, &seat.ctx(0)), Some(tile(27)));

        seat.table.claim_from_bank(PlayerId::new(0), 30).unwrap();
        // ahead: median center tile
        assert_eq!(s.choose_target_tile(&o, &seat.ctx(0)), Some(tile(22)));
        // behind: steal
        assert_eq!(s.choose_target_tile(&o, &seat.ctx(1)), Some(tile(27)));
    }

    #[test]
    fn test_balanced_ties_keep_first_option() {
        let seat = Seat::new(&["A", "B"]);
        let mut s = Balanced;

        // 25 and 26 are both two-worm tiles
        let o = offer(26, &[21, 25, 26], &[]);
        assert_eq!(s.choose_target_tile(&o, &seat.ctx(0)), Some(tile(25)));

        // 2x4 and 4x2 score the same; four was rolled first
        let t = turn(&[(Worm, 2)], &[Four, Two, Two, Four, Two, Two]);
        assert_eq!(s.choose_dice_value(&t, &seat.ctx(0)), Four);
    }

    #[test]
    fn test_targeted_hunts_named_player() {
        let seat = Seat::new(&["A", "B", "C"]);
        let ctx = seat.ctx(0);
        let mut s = Targeted::new(Some("C".into()), 30);

        // below the minimum, but C's top tile is on offer
        assert_eq!(s.choose_target_tile(&offer(24, &[21, 23], &[(24, 2)]), &ctx), Some(tile(24)));
        // no target tile and nothing high enough: best center tile
        assert_eq!(s.choose_target_tile(&offer(24, &[21, 23], &[]), &ctx), Some(tile(23)));
    }

    #[test]
    fn test_targeted_minimum_value() {
        let seat = Seat::new(&["A", "B"]);
        let ctx = seat.ctx(0);
        let mut s = Targeted::default();

        assert_eq!(s.choose_target_tile(&offer(27, &[21, 26, 27], &[]), &ctx), Some(tile(27)));
        assert_eq!(s.choose_target_tile(&offer(23, &[21, 22], &[(23, 1)]), &ctx), Some(tile(23)));
        assert_eq!(s.choose_target_tile(&offer(22, &[21, 22], &[]), &ctx), Some(tile(22)));

        let t = turn(&[(Worm, 2)], &[Five, Four, One, One, One, One]);
        assert_eq!(s.choose_dice_value(&t, &ctx), Five);
        let t = turn(&[(Worm, 3), (Five, 2)], &[One, One, Two]);
        assert_eq!(s.choose_dice_value(&t, &ctx), One);
        assert!(s.should_continue_turn(&turn(&[(Worm, 2), (Four, 2)], &[]), &ctx));
    }
}
