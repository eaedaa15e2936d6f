use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::engine::RoundContext;
use crate::error::Result;
use crate::models::Player;

/// A normalized player pool for one round, as written by the data fetcher
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerPool {
    #[serde(default)]
    pub gameweek: Option<u32>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub is_double: bool,
    #[serde(default)]
    pub is_blank: bool,
    pub players: Vec<Player>,
}

impl PlayerPool {
    /// Load a pool from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        info!("Loading player pool from: {:?}", file_path.as_ref());

        let json_content = std::fs::read_to_string(&file_path)?;
        let pool = Self::from_json(&json_content)?;

        info!("Loaded {} players for GW{:?}", pool.players.len(), pool.gameweek);
        Ok(pool)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Round signals carried by the pool; the wildcard flag comes from the caller
    pub fn context(&self, is_wildcard_week: bool) -> RoundContext {
        RoundContext {
            gameweek: self.gameweek,
            deadline: self.deadline.clone(),
            is_double: self.is_double,
            is_blank: self.is_blank,
            is_wildcard_week,
        }
    }
}
