//! Game-level error type

use arcade_engine::assets::AssetError;
use arcade_engine::config::ConfigError;
use thiserror::Error;

/// Errors that can stop a session from starting
#[derive(Debug, Error)]
pub enum GameError {
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A mesh could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration loaded but describes an unplayable game
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for game setup
pub type GameResult<T> = Result<T, GameError>;
