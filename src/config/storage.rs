//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where completed registrations are written
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkBackend {
    /// Keep records in memory; lost on exit
    #[default]
    Memory,
    /// One YAML file per record under `data_dir`
    File,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub sink_backend: SinkBackend,

    /// Root directory for the file sink's collections
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File the hand-off snapshot is written to
    #[serde(default = "default_handoff_path")]
    pub handoff_path: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("storage.data_dir"));
        }
        if self.handoff_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("storage.handoff_path"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            sink_backend: SinkBackend::default(),
            data_dir: default_data_dir(),
            handoff_path: default_handoff_path(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/records")
}

fn default_handoff_path() -> PathBuf {
    PathBuf::from("./data/chat_context.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.sink_backend, SinkBackend::Memory);
        assert_eq!(config.data_dir, PathBuf::from("./data/records"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_backend_deserialization() {
        let json = r#"{ "sink_backend": "file", "data_dir": "/var/lib/cadastro" }"#;
        let config: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.sink_backend, SinkBackend::File);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/cadastro"));
        assert_eq!(config.handoff_path, default_handoff_path());
    }

    #[test]
    fn test_storage_rejects_empty_path() {
        let config = StorageConfig {
            handoff_path: PathBuf::new(),
            ..StorageConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyPath("storage.handoff_path"))
        );
    }
}
