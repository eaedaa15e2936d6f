use serde::{Deserialize, Serialize};

use crate::error::{Result, SquadEngineError};
use crate::models::Position;
use crate::{DEFAULT_BUDGET_LIMIT, DEFAULT_MAX_PER_CLUB, DEFAULT_SQUAD_SIZE};

/// Configuration for the squad engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Squad composition rules
    pub rules: SquadRules,

    /// Season calendar used for the end-of-season signal
    pub season: SeasonConfig,

    /// Scoring behaviour
    pub scoring: ScoringConfig,
}

/// Per-position player counts, used for both squad quotas and the starting formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLimits {
    pub goalkeepers: usize,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl PositionLimits {
    pub const fn new(goalkeepers: usize, defenders: usize, midfielders: usize, forwards: usize) -> Self {
        Self { goalkeepers, defenders, midfielders, forwards }
    }

    pub fn get(&self, position: Position) -> usize {
        match position {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }

    pub fn total(&self) -> usize {
        self.goalkeepers + self.defenders + self.midfielders + self.forwards
    }

    /// Formation label, e.g. "1-3-4-3"
    pub fn label(&self) -> String {
        format!("{}-{}-{}-{}", self.goalkeepers, self.defenders, self.midfielders, self.forwards)
    }
}

/// Hard constraints the squad builder enforces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadRules {
    /// Budget ceiling in currency-millions
    pub budget_limit: f64,

    /// Squad size per position
    pub quotas: PositionLimits,

    /// Maximum players taken from a single club
    pub max_per_club: usize,

    /// Selection stops once this many players are admitted
    pub squad_size: usize,

    /// Starting lineup shape
    pub formation: PositionLimits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Number of rounds in a season
    pub length: u32,

    /// Trailing rounds that count as end of season
    pub end_window: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score players on the rayon pool
    pub parallel: bool,

    /// Reject pools containing out-of-range player records
    pub validate_players: bool,
}

impl Default for SquadRules {
    fn default() -> Self {
        Self {
            budget_limit: DEFAULT_BUDGET_LIMIT,
            quotas: PositionLimits::new(2, 5, 5, 3),
            max_per_club: DEFAULT_MAX_PER_CLUB,
            squad_size: DEFAULT_SQUAD_SIZE,
            formation: PositionLimits::new(1, 3, 4, 3),
        }
    }
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self { length: 38, end_window: 6 }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { parallel: true, validate_players: false }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: SquadRules::default(),
            season: SeasonConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl SquadRules {
    /// Check the rule set is internally consistent
    pub fn validate(&self) -> Result<()> {
        if !self.budget_limit.is_finite() || self.budget_limit <= 0.0 {
            return Err(SquadEngineError::Configuration(format!(
                "budget limit must be positive, got {}",
                self.budget_limit
            )));
        }
        if self.max_per_club == 0 {
            return Err(SquadEngineError::Configuration("max per club must be at least 1".into()));
        }
        if self.quotas.total() != self.squad_size {
            return Err(SquadEngineError::Configuration(format!(
                "position quotas sum to {} but squad size is {}",
                self.quotas.total(),
                self.squad_size
            )));
        }
        for position in Position::ALL {
            if self.formation.get(position) > self.quotas.get(position) {
                return Err(SquadEngineError::Configuration(format!(
                    "formation needs {} {} but quota allows {}",
                    self.formation.get(position),
                    position,
                    self.quotas.get(position)
                )));
            }
        }
        Ok(())
    }
}

impl SeasonConfig {
    /// Whether the round falls within the final `end_window` rounds
    pub fn is_end_season(&self, gameweek: Option<u32>) -> bool {
        match gameweek {
            Some(gw) if gw > 0 => gw.saturating_add(self.end_window) > self.length,
            _ => false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(budget) = std::env::var("SQUAD_BUDGET_LIMIT") {
            config.rules.budget_limit = budget.parse().unwrap_or(DEFAULT_BUDGET_LIMIT);
        }

        if let Ok(max_per_club) = std::env::var("SQUAD_MAX_PER_CLUB") {
            config.rules.max_per_club = max_per_club.parse().unwrap_or(DEFAULT_MAX_PER_CLUB);
        }

        if let Ok(length) = std::env::var("SQUAD_SEASON_LENGTH") {
            config.season.length = length.parse().unwrap_or(38);
        }

        if let Ok(window) = std::env::var("SQUAD_END_SEASON_WINDOW") {
            config.season.end_window = window.parse().unwrap_or(6);
        }

        if let Ok(parallel) = std::env::var("SQUAD_PARALLEL_SCORING") {
            config.scoring.parallel = parallel.parse().unwrap_or(true);
        }

        if let Ok(validate) = std::env::var("SQUAD_VALIDATE_PLAYERS") {
            config.scoring.validate_players = validate.parse().unwrap_or(false);
        }

        config.rules.validate()?;
        Ok(config)
    }
}
