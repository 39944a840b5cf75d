//! Handoff Store Port - Local ephemeral storage read by the web forms.

use async_trait::async_trait;

use crate::domain::dialogue::HandoffSnapshot;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur while writing a hand-off snapshot
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("Failed to serialize snapshot: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<HandoffError> for DomainError {
    fn from(err: HandoffError) -> Self {
        DomainError::new(ErrorCode::HandoffWrite, err.to_string())
    }
}

/// Port for the single-slot hand-off context
///
/// Write-only from the assistant's side; a new snapshot replaces the old.
#[async_trait]
pub trait HandoffStore: Send + Sync {
    async fn write_snapshot(&self, snapshot: &HandoffSnapshot) -> Result<(), HandoffError>;
}
