//! Error types for the squad engine

use thiserror::Error;

/// Result type for squad engine operations
pub type Result<T> = std::result::Result<T, SquadEngineError>;

/// Errors that can occur around the squad engine core.
///
/// Scoring and selection themselves never fail; these cover configuration,
/// pool loading, parsing, and the optional player validation gate.
#[derive(Error, Debug)]
pub enum SquadEngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid player {id}: {reason}")]
    InvalidPlayer { id: u32, reason: String },

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Unknown position: {0}")]
    UnknownPosition(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
