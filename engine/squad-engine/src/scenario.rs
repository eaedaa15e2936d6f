//! Scenario detection and the weight profile table

use crate::models::{Scenario, Weights};

/// Pick the scenario for a round.
///
/// Several signals can be set at once, so precedence is fixed: wildcard,
/// then double, blank, end of season, and finally default.
pub fn detect_scenario(
    is_double: bool,
    is_blank: bool,
    is_end_season: bool,
    is_wildcard_week: bool,
) -> Scenario {
    if is_wildcard_week {
        Scenario::Wildcard
    } else if is_double {
        Scenario::Double
    } else if is_blank {
        Scenario::Blank
    } else if is_end_season {
        Scenario::EndSeason
    } else {
        Scenario::Default
    }
}

/// Weight profile for a scenario
pub fn scenario_weights(scenario: Scenario) -> Weights {
    match scenario {
        Scenario::Default => Weights {
            predicted_points: 0.40,
            fixture_difficulty: 0.25,
            value_per_million: 0.10,
            rotation_minutes: 0.15,
            form: 0.10,
        },
        Scenario::Double => Weights {
            predicted_points: 0.45,
            fixture_difficulty: 0.30,
            value_per_million: 0.05,
            rotation_minutes: 0.20,
            form: 0.0,
        },
        Scenario::Blank => Weights {
            predicted_points: 0.35,
            fixture_difficulty: 0.20,
            value_per_million: 0.15,
            rotation_minutes: 0.25,
            form: 0.05,
        },
        Scenario::Wildcard => Weights {
            predicted_points: 0.40,
            fixture_difficulty: 0.30,
            value_per_million: 0.05,
            rotation_minutes: 0.10,
            form: 0.15,
        },
        Scenario::EndSeason => Weights {
            predicted_points: 0.40,
            fixture_difficulty: 0.20,
            value_per_million: 0.05,
            rotation_minutes: 0.15,
            form: 0.20,
        },
    }
}

/// Bias a profile toward differentials: more form, less value-per-million.
///
/// Form is capped at 0.25 and value-per-million floored at 0.0.
pub fn differential_weights(weights: Weights) -> Weights {
    Weights {
        form: (weights.form + 0.10).min(0.25),
        value_per_million: (weights.value_per_million - 0.05).max(0.0),
        ..weights
    }
}
