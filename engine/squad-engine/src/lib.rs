//! Squad Engine
//!
//! Recommends a 15-player fantasy squad for a round. Players are scored with a
//! scenario-dependent weighting profile, ranked, and then admitted greedily
//! under budget, position quota and per-club constraints. The admitted squad is
//! split into a starting lineup and a bench, and a captain and vice-captain are
//! picked from the starters.

pub mod builder;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod pool;
pub mod scenario;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use builder::SquadBuilder;
pub use config::{EngineConfig, PositionLimits, ScoringConfig, SeasonConfig, SquadRules};
pub use engine::{Recommendation, RecommendationEngine, RoundContext, Variant};
pub use error::{Result, SquadEngineError};
pub use models::*;
pub use pool::PlayerPool;
pub use scenario::{detect_scenario, differential_weights, scenario_weights};
pub use scoring::{compute_player_score, rank_players, validate_player};

/// Current version of the squad engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default total budget in currency-millions
pub const DEFAULT_BUDGET_LIMIT: f64 = 100.0;

/// Default cap on players selected from one club
pub const DEFAULT_MAX_PER_CLUB: usize = 3;

/// Default number of players in a full squad
pub const DEFAULT_SQUAD_SIZE: usize = 15;

/// Tag written to squad metadata identifying the selection method
pub const SELECTION_NOTE: &str = "Greedy selection";
