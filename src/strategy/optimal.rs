//! Simulation-tuned strategy.
//!
//! Rules of thumb, in order of weight:
//! - secure a worm before anything else
//! - with three dice or fewer, take the highest face
//! - otherwise score faces by `count * points`, plus half a point per extra
//!   die, plus a point for worms and fives while trailing
//! - stop thresholds rise with dice in hand and with the deficit
//! - a steal counts double (more when trailing) against the best center tile

use super::{can_take, first_max_by_key, DecisionContext, Strategy, TAKE_THRESHOLD};
use crate::core::{DiceValue, Tile};
use crate::rules::TileOffer;
use crate::turn::TurnState;

#[derive(Clone, Debug, Default)]
pub struct Optimal;

impl Optimal {
    /// Stop target before adjusting for dice in hand.
    fn base_target(ctx: &DecisionContext<'_>) -> u32 {
        let own = i64::from(ctx.own_worms());
        let best = i64::from(ctx.max_opponent_worms());
        if own < best - 5 {
            30
        } else if own > best + 3 {
            23
        } else {
            26
        }
    }

    fn face_weight(value: DiceValue, count: u8, trailing: bool) -> f64 {
        let count = f64::from(count);
        let base = count * f64::from(value.points());
        let frequency_bonus = (count - 1.0) * 0.5;
        let position_bonus = if trailing && value.points() == 5 { 1.0 } else { 0.0 };
        base + frequency_bonus + position_bonus
    }
}

impl Strategy for Optimal {
    fn name(&self) -> &str {
        "Optimal"
    }

    fn choose_dice_value(&mut self, turn: &TurnState, ctx: &DecisionContext<'_>) -> DiceValue {
        if !turn.has_worm() && turn.can_reserve(DiceValue::Worm) {
            return DiceValue::Worm;
        }

        let reservable = turn.reservable();
        if turn.remaining_dice() <= 3 {
            return first_max_by_key(reservable.iter().map(|&(v, _)| v), |v| v.points())
                .unwrap_or(DiceValue::Worm);
        }

        let trailing = !ctx.is_leading();
        first_max_by_key(reservable, |&(v, count)| Self::face_weight(v, count, trailing))
            .map_or(DiceValue::Worm, |(v, _)| v)
    }

    fn should_continue_turn(&mut self, turn: &TurnState, ctx: &DecisionContext<'_>) -> bool {
        let remaining = turn.remaining_dice();
        if remaining == 0 {
            return false;
        }
        if !can_take(turn) {
            return true;
        }

        let base = Self::base_target(ctx);
        let target = match remaining {
            5.. => base + 2,
            3 | 4 => base,
            2 => base - 3,
            _ => TAKE_THRESHOLD,
        };
        turn.score() < target
    }

    fn choose_target_tile(&mut self, offer: &TileOffer, ctx: &DecisionContext<'_>) -> Option<Tile> {
        if !offer.has_worm {
            return None;
        }

        let best_steal = first_max_by_key(offer.stealable.iter().map(|c| c.tile), |t| t.worms());
        let best_center = first_max_by_key(offer.center.iter().copied(), |t| t.worms());

        match (best_steal, best_center) {
            (Some(steal), Some(center)) => {
                let mut steal_impact = f64::from(steal.worms() * 2);
                if !ctx.is_leading() {
                    steal_impact *= 1.2;
                }
                if steal_impact > f64::from(center.worms()) {
                    Some(steal)
                } else {
                    Some(center)
                }
            }
            (steal, center) => steal.or(center),
        }
    }
}
