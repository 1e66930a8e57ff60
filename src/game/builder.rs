//! Assembling a game: seats, dice and configuration.

use rustc_hash::FxHashSet;

use super::engine::{Controller, GameEngine};
use crate::core::{DiceSource, GameConfig, GameError, GameRng, PlayerMap};
use crate::strategy::{Strategy, StrategyKind};

/// How a seat will be controlled once the game is built.
enum SeatSpec {
    Built(Box<dyn Strategy>),
    Kind(StrategyKind),
    Relay,
}

/// Builder for [`GameEngine`].
///
/// Seats act in the order they are added. Unless dice are supplied, they
/// come from a [`GameRng`] derived from the config seed, and strategies
/// added by [`StrategyKind`] get their own seeds from it too, so a seed and
/// a seat list fully determine a game.
///
/// ```
/// use rust_pikomino::game::GameBuilder;
/// use rust_pikomino::strategy::StrategyKind;
///
/// let game = GameBuilder::new()
///     .seed(3)
///     .strategy_player("Ada", StrategyKind::Optimal)
///     .relay_player("You")
///     .build()
///     .unwrap();
/// assert_eq!(game.player_count(), 2);
/// ```
pub struct GameBuilder {
    config: GameConfig,
    seats: Vec<(String, SeatSpec)>,
    dice: Option<Box<dyn DiceSource + Send>>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            seats: Vec::new(),
            dice: None,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Seat a player driven by `strategy`.
    #[must_use]
    pub fn player(mut self, name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        self.seats.push((name.into(), SeatSpec::Built(strategy)));
        self
    }

    /// Seat a built-in strategy, seeded from the game seed and the name.
    #[must_use]
    pub fn strategy_player(mut self, name: impl Into<String>, kind: StrategyKind) -> Self {
        self.seats.push((name.into(), SeatSpec::Kind(kind)));
        self
    }

    /// Seat a player whose decisions arrive through the relay entry points.
    #[must_use]
    pub fn relay_player(mut self, name: impl Into<String>) -> Self {
        self.seats.push((name.into(), SeatSpec::Relay));
        self
    }

    /// Use `dice` instead of the seeded generator.
    #[must_use]
    pub fn dice(mut self, dice: impl DiceSource + Send + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// Validate the seat list and create the engine.
    ///
    /// Fails with [`GameError::InvalidConfig`] if the seat count falls
    /// outside the configured bounds or two seats share a name.
    pub fn build(self) -> Result<GameEngine, GameError> {
        self.config.validate(self.seats.len())?;

        let mut seen = FxHashSet::default();
        for (name, _) in &self.seats {
            if !seen.insert(name.as_str()) {
                return Err(GameError::InvalidConfig(format!("duplicate player name {name:?}")));
            }
        }

        let root = GameRng::new(self.config.seed);
        let dice = self
            .dice
            .unwrap_or_else(|| Box::new(root.for_context("dice")) as Box<dyn DiceSource + Send>);

        let (names, controllers): (Vec<String>, Vec<Controller>) = self
            .seats
            .into_iter()
            .map(|(name, spec)| {
                let controller = match spec {
                    SeatSpec::Built(strategy) => Controller::Strategy(strategy),
                    SeatSpec::Kind(kind) => {
                        Controller::Strategy(kind.build(root.for_context(&name).seed()))
                    }
                    SeatSpec::Relay => Controller::Relay,
                };
                (name, controller)
            })
            .unzip();

        tracing::debug!("new game, seed {}, seats {:?}", self.config.seed, names);
        Ok(GameEngine::new(
            self.config,
            PlayerMap::from_vec(names),
            PlayerMap::from_vec(controllers),
            dice,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Balanced;

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(GameBuilder::new().build(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_seat_bounds() {
        let crowded = (0..9).fold(GameBuilder::new(), |b, i| b.relay_player(format!("P{i}")));
        assert!(matches!(crowded.build(), Err(GameError::InvalidConfig(_))));

        let duel_only = GameBuilder::new()
            .config(GameConfig::default().with_player_bounds(2, 2))
            .relay_player("Solo");
        assert!(duel_only.build().is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = GameBuilder::new()
            .player("Ann", Box::new(Balanced))
            .relay_player("Ann")
            .build();
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_seats_in_order() {
        let game = GameBuilder::new()
            .seed(9)
            .relay_player("First")
            .strategy_player("Second", StrategyKind::Aggressive)
            .build()
            .unwrap();

        let names: Vec<&str> = game.names().iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(game.config().seed, 9);
        assert!(game.controller(crate::core::PlayerId::new(0)).is_relay());
    }
}
