use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::SquadEngineError;

/// Playing position of a squad member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GKP")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward];

    /// Short code used by the fantasy game (e.g., "GKP")
    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Position::Goalkeeper => 0,
            Position::Defender => 1,
            Position::Midfielder => 2,
            Position::Forward => 3,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = SquadEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|position| position.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SquadEngineError::UnknownPosition(s.to_string()))
    }
}

/// A normalized player record, as supplied by the data feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    /// Club identifier, used for the per-club cap
    pub team_id: u32,
    #[serde(default)]
    pub team_name: String,
    pub position: Position,
    /// Price in currency-millions
    pub price: f64,
    pub form: f64,
    /// Average minutes per 90-minute match (0-90)
    pub minutes_avg90: f64,
    pub predicted_points: f64,
    /// Nominally 1-5, lower is easier
    pub fixture_difficulty: f64,
    /// Ownership percentage (0-100)
    #[serde(default)]
    pub selected_by_percent: f64,
}

/// Linear weighting applied to the scoring components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub predicted_points: f64,
    pub fixture_difficulty: f64,
    pub value_per_million: f64,
    pub rotation_minutes: f64,
    pub form: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.predicted_points
            + self.fixture_difficulty
            + self.value_per_million
            + self.rotation_minutes
            + self.form
    }
}

/// Round scenario selecting which weight profile applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Default,
    Double,
    Blank,
    Wildcard,
    EndSeason,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Default,
        Scenario::Double,
        Scenario::Blank,
        Scenario::Wildcard,
        Scenario::EndSeason,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Default => "default",
            Scenario::Double => "double",
            Scenario::Blank => "blank",
            Scenario::Wildcard => "wildcard",
            Scenario::EndSeason => "end_season",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = SquadEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SquadEngineError::UnknownScenario(s.to_string()))
    }
}

/// A player paired with its score under some weighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlayer {
    pub player: Player,
    pub score: f64,
}

impl ScoredPlayer {
    pub fn new(player: Player, score: f64) -> Self {
        Self { player, score }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadMember {
    pub player: Player,
    pub is_starting: bool,
}

/// Final output of one selection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub gameweek: u32,
    pub deadline: Option<String>,
    /// Rounded to one decimal place
    pub budget_used: f64,
    pub budget_limit: f64,
    pub captain_id: Option<u32>,
    pub vice_captain_id: Option<u32>,
    pub starting: Vec<SquadMember>,
    pub bench: Vec<SquadMember>,
    pub metadata: BTreeMap<String, String>,
}

impl Squad {
    /// Starters followed by bench, in selection order within each group
    pub fn members(&self) -> impl Iterator<Item = &SquadMember> {
        self.starting.iter().chain(self.bench.iter())
    }

    pub fn total_selected(&self) -> usize {
        self.starting.len() + self.bench.len()
    }

    pub fn formation(&self) -> Option<&str> {
        self.metadata.get("formation").map(String::as_str)
    }

    /// Expected points from the starting lineup, with the captain counted twice
    pub fn predicted_points(&self) -> f64 {
        self.starting
            .iter()
            .map(|member| {
                let pts = member.player.predicted_points;
                if Some(member.player.id) == self.captain_id {
                    pts * 2.0
                } else {
                    pts
                }
            })
            .sum()
    }
}
