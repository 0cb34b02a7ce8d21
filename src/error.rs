//! Startup errors
//!
//! Everything here is fatal and surfaced to the shell. The simulation itself
//! never returns errors once a game is running.

use crate::settings::AssetRole;

/// Errors raised while building a game from its settings
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// A sprite role has no identifier in the configured sprite table
    #[error("no sprite configured for role `{0}`")]
    AssetMissing(AssetRole),

    /// Settings failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Settings file could not be read
    #[error("failed to read settings: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Settings file is not valid JSON for `Settings`
    #[error("failed to parse settings: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
