//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CADASTRO_ASSISTANT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use cadastro_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Records go to {}", config.storage.data_dir.display());
//! ```

mod dialogue;
mod error;
mod features;
mod geolocation;
mod logging;
mod storage;

pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use geolocation::GeolocationConfig;
pub use logging::LoggingConfig;
pub use storage::{SinkBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// in-memory assistant. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Record sink and hand-off locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Dialogue behaviour (default sector, hand-off tail length)
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Optional fixed device position
    #[serde(default)]
    pub geolocation: GeolocationConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CADASTRO_ASSISTANT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CADASTRO_ASSISTANT__STORAGE__SINK_BACKEND=file` -> `storage.sink_backend = file`
    /// - `CADASTRO_ASSISTANT__DIALOGUE__TRANSCRIPT_TAIL_LEN=20` -> `dialogue.transcript_tail_len = 20`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CADASTRO_ASSISTANT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first section that fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.storage.validate()?;
        self.dialogue.validate()?;
        self.geolocation.validate()?;
        Ok(())
    }
}
