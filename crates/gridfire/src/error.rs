//! Game-level errors

use gridfire_engine::config::ConfigError;
use gridfire_engine::physics::{BoundsError, CollisionError};
use thiserror::Error;

/// Anything that can stop a game session
#[derive(Error, Debug)]
pub enum GameError {
    /// A collision pass could not record its pairs
    #[error("Collision pass failed: {0}")]
    Collision(#[from] CollisionError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A participant was given malformed extents
    #[error("Invalid bounds: {0}")]
    Bounds(#[from] BoundsError),
}
