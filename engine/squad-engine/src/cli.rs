//! # Command Line Interface
//!
//! Arguments for the `squad-engine` binary.

use clap::Parser;
use std::path::PathBuf;

use crate::engine::Variant;
use crate::error::Result;
use crate::models::Scenario;

/// Recommend a fantasy squad from a normalized player pool
#[derive(Parser, Debug)]
#[command(name = "squad-engine")]
#[command(about = "Recommend a 15-player fantasy squad for the current round")]
pub struct Cli {
    /// Path to the player pool JSON file
    #[arg(short, long, default_value = "./data/player_pool.json")]
    pub pool: PathBuf,

    /// Treat this round as a wildcard week
    #[arg(long)]
    pub wildcard: bool,

    /// Bias selection toward differentials
    #[arg(long)]
    pub differential: bool,

    /// Force a scenario instead of detecting it (default, double, blank, wildcard, end_season)
    #[arg(long)]
    pub scenario: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub fn variant(&self) -> Variant {
        if self.differential {
            Variant::Differential
        } else {
            Variant::Standard
        }
    }

    pub fn scenario_override(&self) -> Result<Option<Scenario>> {
        self.scenario.as_deref().map(str::parse::<Scenario>).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["squad-engine"]);
        assert_eq!(cli.pool, PathBuf::from("./data/player_pool.json"));
        assert_eq!(cli.variant(), Variant::Standard);
        assert_eq!(cli.scenario_override().unwrap(), None);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "squad-engine",
            "--pool",
            "gw12.json",
            "--differential",
            "--scenario",
            "blank",
        ]);
        assert_eq!(cli.pool, PathBuf::from("gw12.json"));
        assert_eq!(cli.variant(), Variant::Differential);
        assert_eq!(cli.scenario_override().unwrap(), Some(Scenario::Blank));
    }

    #[test]
    fn test_bad_scenario() {
        let cli = Cli::parse_from(["squad-engine", "--scenario", "triple"]);
        assert!(cli.scenario_override().is_err());
    }
}
