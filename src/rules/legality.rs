//! Legality checks shared by the turn engine and strategies.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{distinct_faces, DiceValue, PlayerId, Tile};
use crate::tiles::{StealCandidate, TileTable};

/// Faces in `roll` that have not been reserved yet this turn, in face order.
///
/// An empty result means the turn busts without asking anyone.
#[must_use]
pub fn legal_values(roll: &[DiceValue], reserved: &[DiceValue]) -> SmallVec<[DiceValue; 6]> {
    distinct_faces(roll)
        .into_iter()
        .filter(|face| !reserved.contains(face))
        .collect()
}

/// Where a claimed tile came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileSource {
    Center,
    Opponent(PlayerId),
}

/// The tiles a finished roll sequence may claim.
///
/// Built once when the turn resolves. The engine imposes no preference
/// among candidates; picking one is the strategy's call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileOffer {
    pub score: u32,
    pub has_worm: bool,
    /// Bank tiles with `value <= score`, lowest first.
    pub center: Vec<Tile>,
    /// Opponents' top tiles with `value == score`.
    pub stealable: Vec<StealCandidate>,
}

impl TileOffer {
    /// Gather candidates for `player` finishing with `score`.
    #[must_use]
    pub fn build(table: &TileTable, player: PlayerId, score: u32, has_worm: bool) -> Self {
        Self {
            score,
            has_worm,
            center: table.bank().eligible_center_tiles(score),
            stealable: table.stealable_tiles(player, score),
        }
    }

    /// A worm was reserved and at least one candidate exists.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.has_worm && !(self.center.is_empty() && self.stealable.is_empty())
    }

    /// Locate `tile` among the candidates.
    #[must_use]
    pub fn source_of(&self, tile: Tile) -> Option<TileSource> {
        if self.center.contains(&tile) {
            return Some(TileSource::Center);
        }
        self.stealable
            .iter()
            .find(|c| c.tile == tile)
            .map(|c| TileSource::Opponent(c.owner))
    }

    /// Every candidate tile, center first.
    pub fn candidates(&self) -> impl Iterator<Item = Tile> + '_ {
        self.center
            .iter()
            .copied()
            .chain(self.stealable.iter().map(|c| c.tile))
    }
}
