//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Print full error details in the terminal host (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}
