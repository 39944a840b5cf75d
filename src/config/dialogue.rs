//! Dialogue configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::Sector;

const MAX_TAIL_LEN: usize = 100;

/// Dialogue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Sector used for hand-offs when the conversation gives no hint
    #[serde(default = "default_sector")]
    pub default_sector: Sector,

    /// Number of transcript entries copied into a hand-off snapshot
    #[serde(default = "default_tail_len")]
    pub transcript_tail_len: usize,

    /// Capacity of the widget command channel
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,

    /// How long a closing widget waits for record writes still in flight
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl DialogueConfig {
    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.transcript_tail_len == 0 || self.transcript_tail_len > MAX_TAIL_LEN {
            return Err(ValidationError::InvalidTailLength(self.transcript_tail_len));
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            default_sector: default_sector(),
            transcript_tail_len: default_tail_len(),
            command_buffer: default_command_buffer(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

fn default_sector() -> Sector {
    Sector::Agricultura
}

fn default_tail_len() -> usize {
    10
}

fn default_command_buffer() -> usize {
    32
}

fn default_shutdown_grace_ms() -> u64 {
    2_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialogue_defaults() {
        let config = DialogueConfig::default();
        assert_eq!(config.default_sector, Sector::Agricultura);
        assert_eq!(config.transcript_tail_len, 10);
        assert_eq!(config.shutdown_grace_ms, 2_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dialogue_tail_bounds() {
        for (len, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let config = DialogueConfig {
                transcript_tail_len: len,
                ..DialogueConfig::default()
            };
            assert_eq!(config.validate().is_ok(), ok, "tail length {}", len);
        }
    }

    #[test]
    fn test_dialogue_sector_deserialization() {
        let config: DialogueConfig = serde_json::from_str(r#"{ "default_sector": "paa" }"#).unwrap();
        assert_eq!(config.default_sector, Sector::Paa);
    }
}
