//! Built-in and caller-supplied strategies playing whole games.

use rust_pikomino::core::{DiceValue, GameError, LoadedDice, PlayerId, Tile};
use rust_pikomino::game::GameBuilder;
use rust_pikomino::rules::TileOffer;
use rust_pikomino::strategy::{DecisionContext, Randomized, Strategy, StrategyKind};
use rust_pikomino::turn::{BustReason, TurnState};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_every_kind_finishes_solo_and_duel() {
    init_tracing();
    for kind in StrategyKind::all() {
        let mut solo = GameBuilder::new()
            .seed(11)
            .strategy_player("Solo", kind.clone())
            .build()
            .unwrap();
        solo.play_game().unwrap();
        assert!(solo.table().bank().is_empty(), "{kind:?} solo");
        // nobody to steal from, so every success came from the center
        assert_eq!(
            solo.history().turns().filter(|t| t.is_success()).count(),
            solo.table().stack(PlayerId::new(0)).len()
        );

        let mut duel = GameBuilder::new()
            .seed(12)
            .strategy_player("A", kind.clone())
            .strategy_player("B", kind.clone())
            .build()
            .unwrap();
        duel.play_game().unwrap();
        assert!(duel.is_over(), "{kind:?} duel");
    }
}

#[test]
fn test_round_robin_tournament() {
    init_tracing();
    let kinds = StrategyKind::all();
    let mut wins = vec![0u32; kinds.len()];

    for (i, a) in kinds.iter().enumerate() {
        for (j, b) in kinds.iter().enumerate().filter(|&(j, _)| j != i) {
            let mut game = GameBuilder::new()
                .seed((i * kinds.len() + j) as u64)
                .strategy_player("Home", a.clone())
                .strategy_player("Away", b.clone())
                .build()
                .unwrap();
            let result = game.play_game().unwrap();
            if result.is_winner(PlayerId::new(0)) {
                wins[i] += 1;
            }
            if result.is_winner(PlayerId::new(1)) {
                wins[j] += 1;
            }
        }
    }

    // 30 games, each with at least one winner
    assert!(wins.iter().sum::<u32>() >= 30);
}

#[test]
fn test_targeted_named_victim() {
    let kind = StrategyKind::Targeted {
        target_player: Some("Mark".into()),
        min_target_value: 21,
    };
    let mut game = GameBuilder::new()
        .seed(99)
        .strategy_player("Hunter", kind)
        .strategy_player("Mark", StrategyKind::Conservative)
        .strategy_player("Bystander", StrategyKind::Balanced)
        .build()
        .unwrap();
    game.play_game().unwrap();
    assert!(game.table().check_conservation().is_ok());
}

#[test]
fn test_randomized_extremes() {
    for p in [0.0, 1.0] {
        let mut game = GameBuilder::new()
            .seed(4)
            .player("Coin", Box::new(Randomized::new(4, p)))
            .strategy_player("Steady", StrategyKind::Balanced)
            .build()
            .unwrap();
        game.play_game().unwrap();

        for record in game.history().player_turns(PlayerId::new(0)) {
            let dice: u8 = record.reserved.iter().map(|&(_, n)| n).sum();
            if p == 0.0 {
                // stops the first time a tile is within reach
                let (before, _) = record.reserved.split_at(record.reserved.len().saturating_sub(1));
                let score: u32 = before.iter().map(|&(v, n)| v.points() * u32::from(n)).sum();
                let worm = before.iter().any(|&(v, _)| v.is_worm());
                assert!(!(worm && score >= 21), "kept rolling at {score}");
            } else {
                // only running out of dice or options ends the turn
                assert!(
                    dice == 8 || record.outcome.bust_reason() == Some(BustReason::NoLegalValue),
                    "stopped early: {record:?}"
                );
            }
        }
    }
}

/// Always takes the first legal face and stops straight away.
struct FirstAndStop;

impl Strategy for FirstAndStop {
    fn name(&self) -> &str {
        "FirstAndStop"
    }

    fn choose_dice_value(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> DiceValue {
        turn.legal_values()[0]
    }

    fn should_continue_turn(&mut self, _turn: &TurnState, _ctx: &DecisionContext<'_>) -> bool {
        false
    }

    fn choose_target_tile(
        &mut self,
        offer: &TileOffer,
        _ctx: &DecisionContext<'_>,
    ) -> Option<Tile> {
        offer.candidates().next()
    }
}

/// Answers with a face that was never rolled.
struct Cheater;

impl Strategy for Cheater {
    fn name(&self) -> &str {
        "Cheater"
    }

    fn choose_dice_value(&mut self, turn: &TurnState, _ctx: &DecisionContext<'_>) -> DiceValue {
        DiceValue::ALL
            .into_iter()
            .find(|v| turn.count_in_roll(*v) == 0)
            .unwrap_or(DiceValue::One)
    }

    fn should_continue_turn(&mut self, _turn: &TurnState, _ctx: &DecisionContext<'_>) -> bool {
        true
    }

    fn choose_target_tile(
        &mut self,
        _offer: &TileOffer,
        _ctx: &DecisionContext<'_>,
    ) -> Option<Tile> {
        None
    }
}

#[test]
fn test_custom_strategy_plays() {
    let mut game = GameBuilder::new()
        .seed(21)
        .player("Hasty", Box::new(FirstAndStop))
        .strategy_player("Optimal", StrategyKind::Optimal)
        .build()
        .unwrap();
    game.play_game().unwrap();
    assert!(game.history().player_turns(PlayerId::new(0)).count() > 0);
}

#[test]
fn test_illegal_strategy_answer_stops_game() {
    let mut game = GameBuilder::new()
        .player("Cheater", Box::new(Cheater))
        .dice(LoadedDice::new([DiceValue::One; 8]))
        .build()
        .unwrap();

    match game.play_turn() {
        Err(GameError::StrategyProtocolViolation { player, .. }) => {
            assert_eq!(player, PlayerId::new(0));
        }
        other => panic!("expected a protocol violation, got {other:?}"),
    }
    // the offending turn is still open and nothing moved
    assert!(game.turn().is_some());
    assert_eq!(game.table().bank().len(), 16);
    assert!(game.history().is_empty());
}
