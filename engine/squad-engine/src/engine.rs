use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::SquadBuilder;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{Player, Scenario, Squad, Weights};
use crate::scenario::{detect_scenario, differential_weights, scenario_weights};
use crate::scoring::{rank_players, validate_player};

/// Signals about the round being planned, supplied by the data feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundContext {
    /// Active round, if known
    pub gameweek: Option<u32>,

    /// ISO-8601 deadline timestamp
    pub deadline: Option<String>,

    pub is_double: bool,
    pub is_blank: bool,
    pub is_wildcard_week: bool,
}

impl RoundContext {
    /// Whether `now` is at or past the round deadline.
    ///
    /// A missing or unparsable deadline, or one without a UTC offset, counts as not passed.
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        let Some(deadline) = self.deadline.as_deref() else {
            return false;
        };
        match DateTime::parse_from_rfc3339(deadline) {
            Ok(deadline) => now >= deadline.with_timezone(&Utc),
            Err(_) => false,
        }
    }
}

/// Which recommendation flow to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Plain scenario weights
    Standard,
    /// Form-biased weights favouring differentials; ignores the wildcard signal
    Differential,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Differential => "differential",
        }
    }
}

/// A squad together with how it was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub scenario: Scenario,
    pub variant: Variant,
    pub weights: Weights,
    pub squad: Squad,
}

/// Chains scenario detection, scoring, ranking and squad selection
pub struct RecommendationEngine {
    config: EngineConfig,
    builder: SquadBuilder,
}

impl RecommendationEngine {
    /// Create a new engine, rejecting inconsistent squad rules
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.rules.validate()?;
        let builder = SquadBuilder::new(config.rules.clone());
        Ok(Self { config, builder })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scenario implied by the round signals
    pub fn scenario_for(&self, ctx: &RoundContext, variant: Variant) -> Scenario {
        let is_wildcard_week = match variant {
            Variant::Standard => ctx.is_wildcard_week,
            Variant::Differential => false,
        };
        detect_scenario(
            ctx.is_double,
            ctx.is_blank,
            self.config.season.is_end_season(ctx.gameweek),
            is_wildcard_week,
        )
    }

    /// Recommend a squad for the round
    pub fn recommend(
        &self,
        players: &[Player],
        ctx: &RoundContext,
        variant: Variant,
    ) -> Result<Recommendation> {
        let scenario = self.scenario_for(ctx, variant);
        self.recommend_for_scenario(players, ctx, scenario, variant)
    }

    /// Recommend a squad with the scenario forced rather than detected
    pub fn recommend_for_scenario(
        &self,
        players: &[Player],
        ctx: &RoundContext,
        scenario: Scenario,
        variant: Variant,
    ) -> Result<Recommendation> {
        if self.config.scoring.validate_players {
            players.iter().try_for_each(validate_player)?;
        }

        let weights = match variant {
            Variant::Standard => scenario_weights(scenario),
            Variant::Differential => differential_weights(scenario_weights(scenario)),
        };
        info!(
            "Recommending {} squad for GW{:?} under {} scenario",
            variant.as_str(),
            ctx.gameweek,
            scenario
        );

        let ranked = rank_players(players, &weights, self.config.scoring.parallel);
        let mut squad = self.builder.select(&ranked, ctx.gameweek.unwrap_or(0), ctx.deadline.clone());
        squad.metadata.insert("scenario".to_string(), scenario.as_str().to_string());
        squad.metadata.insert("variant".to_string(), variant.as_str().to_string());

        info!(
            "Squad ready: {} players, captain {:?}, vice {:?}, budget {:.1}",
            squad.total_selected(),
            squad.captain_id,
            squad.vice_captain_id,
            squad.budget_used
        );

        Ok(Recommendation { scenario, variant, weights, squad })
    }
}
