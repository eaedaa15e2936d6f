//! End-to-end and property tests for scoring plus selection

use proptest::prelude::*;
use std::collections::HashMap;

use crate::config::{EngineConfig, SquadRules};
use crate::engine::{RecommendationEngine, RoundContext, Variant};
use crate::models::{Player, Position, Scenario, ScoredPlayer};
use crate::scenario::scenario_weights;
use crate::scoring::{compute_player_score, rank_players};
use crate::SquadBuilder;

fn make_player(id: u32, position: Position, team_id: u32, price: f64, predicted: f64) -> Player {
    Player {
        id,
        name: format!("Player {id}"),
        team_id,
        team_name: format!("Club {team_id}"),
        position,
        price,
        form: predicted / 2.0,
        minutes_avg90: 75.0,
        predicted_points: predicted,
        fixture_difficulty: 3.0,
        selected_by_percent: 12.0,
    }
}

fn position_strategy() -> impl Strategy<Value = Position> {
    prop_oneof![
        Just(Position::Goalkeeper),
        Just(Position::Defender),
        Just(Position::Midfielder),
        Just(Position::Forward),
    ]
}

fn player_strategy() -> impl Strategy<Value = Player> {
    (
        position_strategy(),
        1u32..8,
        3.5f64..15.0,
        -2.0f64..12.0,
        -1.0f64..10.0,
        0.0f64..=90.0,
        1.0f64..=5.0,
    )
        .prop_map(|(position, team_id, price, predicted, form, minutes, difficulty)| Player {
            id: 0,
            name: String::new(),
            team_id,
            team_name: String::new(),
            position,
            price,
            form,
            minutes_avg90: minutes,
            predicted_points: predicted,
            fixture_difficulty: difficulty,
            selected_by_percent: 0.0,
        })
}

fn pool_strategy() -> impl Strategy<Value = Vec<Player>> {
    prop::collection::vec(player_strategy(), 0..80).prop_map(|mut players| {
        for (i, p) in players.iter_mut().enumerate() {
            p.id = i as u32 + 1;
            p.name = format!("Player {}", p.id);
        }
        players
    })
}

#[test]
fn test_three_goalkeepers_quota_example() {
    let scored = vec![
        ScoredPlayer::new(make_player(1, Position::Goalkeeper, 1, 5.0, 6.0), 3.0),
        ScoredPlayer::new(make_player(2, Position::Goalkeeper, 1, 4.5, 5.0), 2.0),
        ScoredPlayer::new(make_player(3, Position::Goalkeeper, 1, 4.0, 4.0), 1.0),
    ];
    let squad = SquadBuilder::default().select(&scored, 1, None);
    let ids: Vec<u32> = squad.members().map(|m| m.player.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_top_scorer_skipped_when_club_full() {
    // Three high scorers from club 1 fill its cap before the best player is reached
    let mut scored = vec![
        ScoredPlayer::new(make_player(1, Position::Defender, 1, 5.0, 5.0), 10.0),
        ScoredPlayer::new(make_player(2, Position::Midfielder, 1, 5.0, 5.0), 9.0),
        ScoredPlayer::new(make_player(3, Position::Forward, 1, 5.0, 5.0), 8.0),
        // Best remaining candidate and its quota has room, but club 1 is full
        ScoredPlayer::new(make_player(99, Position::Midfielder, 1, 5.0, 20.0), 7.5),
    ];
    let mut id = 3;
    for (position, team_id) in [
        (Position::Goalkeeper, 2),
        (Position::Goalkeeper, 3),
        (Position::Defender, 4),
        (Position::Defender, 5),
        (Position::Defender, 6),
        (Position::Defender, 2),
        (Position::Midfielder, 3),
        (Position::Midfielder, 4),
        (Position::Midfielder, 5),
        (Position::Midfielder, 6),
        (Position::Forward, 2),
        (Position::Forward, 3),
    ] {
        id += 1;
        scored.push(ScoredPlayer::new(make_player(id, position, team_id, 5.0, 4.0), 7.0 - id as f64 / 100.0));
    }
    let squad = SquadBuilder::default().select(&scored, 1, None);
    assert_eq!(squad.total_selected(), 15);
    assert!(squad.members().all(|m| m.player.id != 99));
}

#[test]
fn test_end_to_end_recommendation_is_deterministic() {
    let mut players = Vec::new();
    let mut id = 0;
    for team_id in 1..=10 {
        for position in Position::ALL {
            id += 1;
            players.push(make_player(id, position, team_id, 4.0 + (id % 3) as f64 * 0.5, (id % 11) as f64));
        }
    }
    let engine = RecommendationEngine::new(EngineConfig::default()).unwrap();
    let ctx = RoundContext { gameweek: Some(20), is_blank: true, ..Default::default() };

    let first = engine.recommend(&players, &ctx, Variant::Standard).unwrap();
    let second = engine.recommend(&players, &ctx, Variant::Standard).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.scenario, Scenario::Blank);
    assert_eq!(first.squad.starting.len(), 11);
    assert_eq!(first.squad.bench.len(), 4);
    assert!(first.squad.budget_used <= 100.0);
}

proptest! {
    #[test]
    fn prop_selection_respects_rules(players in pool_strategy(), scenario_idx in 0usize..5) {
        let weights = scenario_weights(Scenario::ALL[scenario_idx]);
        let ranked = rank_players(&players, &weights, false);
        let rules = SquadRules::default();
        let squad = SquadBuilder::new(rules.clone()).select(&ranked, 1, None);

        prop_assert!(squad.budget_used <= rules.budget_limit);
        prop_assert!(squad.total_selected() <= rules.squad_size);
        prop_assert!(squad.starting.len() <= rules.formation.total());

        let mut per_club: HashMap<u32, usize> = HashMap::new();
        let mut per_position: HashMap<Position, usize> = HashMap::new();
        for member in squad.members() {
            *per_club.entry(member.player.team_id).or_insert(0) += 1;
            *per_position.entry(member.player.position).or_insert(0) += 1;
        }
        prop_assert!(per_club.values().all(|&n| n <= rules.max_per_club));
        for position in Position::ALL {
            let n = per_position.get(&position).copied().unwrap_or(0);
            prop_assert!(n <= rules.quotas.get(position));
            let starters = squad.starting.iter().filter(|m| m.player.position == position).count();
            prop_assert_eq!(starters, n.min(rules.formation.get(position)));
        }
    }

    #[test]
    fn prop_captains_distinct_unless_single_starter(players in pool_strategy()) {
        let ranked = rank_players(&players, &scenario_weights(Scenario::Default), false);
        let squad = SquadBuilder::default().select(&ranked, 1, None);

        match squad.starting.len() {
            0 => {
                prop_assert_eq!(squad.captain_id, None);
                prop_assert_eq!(squad.vice_captain_id, None);
            }
            1 => {
                prop_assert_eq!(squad.captain_id, squad.vice_captain_id);
            }
            _ => {
                prop_assert!(squad.captain_id.is_some());
                prop_assert_ne!(squad.captain_id, squad.vice_captain_id);
            }
        }
    }

    #[test]
    fn prop_parallel_and_sequential_ranking_agree(players in pool_strategy()) {
        let weights = scenario_weights(Scenario::Wildcard);
        let sequential = rank_players(&players, &weights, false);
        let parallel = rank_players(&players, &weights, true);
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn prop_score_monotonic(player in player_strategy(), bump in 0.01f64..5.0) {
        let weights = scenario_weights(Scenario::Default);
        let base = compute_player_score(&player, &weights);

        let mut more_points = player.clone();
        more_points.predicted_points += bump;
        prop_assert!(compute_player_score(&more_points, &weights) > base);

        let mut harder = player.clone();
        harder.fixture_difficulty += bump;
        prop_assert!(compute_player_score(&harder, &weights) < base);
    }
}
