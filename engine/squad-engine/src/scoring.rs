use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info};

use crate::error::{Result, SquadEngineError};
use crate::models::{Player, ScoredPlayer, Weights};

/// Price floor applied before dividing, in currency-millions
pub const MIN_PRICE: f64 = 0.1;

/// Score a player as a linear combination of its weighted components.
///
/// Never fails and never clamps: out-of-range inputs just produce skewed scores.
pub fn compute_player_score(player: &Player, weights: &Weights) -> f64 {
    let value_per_million = player.predicted_points / player.price.max(MIN_PRICE);
    // Easier fixtures score higher
    let fixture_component = 5.0 - player.fixture_difficulty;
    let rotation_component = player.minutes_avg90 / 90.0;

    weights.predicted_points * player.predicted_points
        + weights.fixture_difficulty * fixture_component
        + weights.value_per_million * value_per_million
        + weights.rotation_minutes * rotation_component
        + weights.form * player.form
}

/// Score every player and sort by descending score.
///
/// The sort is stable, so equal scores keep input order. NaN scores go last.
pub fn rank_players(players: &[Player], weights: &Weights, parallel: bool) -> Vec<ScoredPlayer> {
    let mut scored: Vec<ScoredPlayer> = if parallel {
        players
            .par_iter()
            .map(|p| ScoredPlayer::new(p.clone(), compute_player_score(p, weights)))
            .collect()
    } else {
        players
            .iter()
            .map(|p| ScoredPlayer::new(p.clone(), compute_player_score(p, weights)))
            .collect()
    };

    scored.sort_by(|a, b| descending(a.score, b.score));

    if let Some(top) = scored.first() {
        debug!("Top scored player: {} ({:.3})", top.player.name, top.score);
    }
    info!("Scored {} players (parallel: {})", scored.len(), parallel);

    scored
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Reject records the scoring formula would silently mis-rank
pub fn validate_player(player: &Player) -> Result<()> {
    let invalid = |reason: String| SquadEngineError::InvalidPlayer { id: player.id, reason };

    let fields = [
        ("price", player.price),
        ("form", player.form),
        ("minutes_avg90", player.minutes_avg90),
        ("predicted_points", player.predicted_points),
        ("fixture_difficulty", player.fixture_difficulty),
        ("selected_by_percent", player.selected_by_percent),
    ];
    if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(invalid(format!("{name} is not finite ({value})")));
    }
    if player.price <= 0.0 {
        return Err(invalid(format!("price must be positive, got {}", player.price)));
    }
    if !(0.0..=90.0).contains(&player.minutes_avg90) {
        return Err(invalid(format!("minutes_avg90 out of range: {}", player.minutes_avg90)));
    }
    if !(1.0..=5.0).contains(&player.fixture_difficulty) {
        return Err(invalid(format!(
            "fixture_difficulty out of range: {}",
            player.fixture_difficulty
        )));
    }
    if !(0.0..=100.0).contains(&player.selected_by_percent) {
        return Err(invalid(format!(
            "selected_by_percent out of range: {}",
            player.selected_by_percent
        )));
    }
    Ok(())
}
