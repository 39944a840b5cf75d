//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),

    #[error("Transcript tail length must be between 1 and 100, got {0}")]
    InvalidTailLength(usize),

    #[error("Latitude {0} is outside -90..=90")]
    InvalidLatitude(f64),

    #[error("Longitude {0} is outside -180..=180")]
    InvalidLongitude(f64),

    #[error("Storage path must not be empty: {0}")]
    EmptyPath(&'static str),
}
