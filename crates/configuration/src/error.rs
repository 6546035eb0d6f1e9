use core_types::WeightError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid weight table: {0}")]
    InvalidWeights(#[from] WeightError),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
