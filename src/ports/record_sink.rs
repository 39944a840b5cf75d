//! Record Sink Port - Interface for persisting completed registrations.
//!
//! Each completed flow appends one record to a named collection
//! (`solicitacoes_agricultura`, `solicitacoes_pesca`, `solicitacoes_paa`).
//! Records are never read back by the assistant.

use async_trait::async_trait;

use crate::domain::dialogue::AssembledRecord;
use crate::domain::foundation::{DomainError, ErrorCode, RecordId};

/// Errors that can occur while appending a record
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to serialize record: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Collection '{0}' is not accepted by this sink")]
    UnknownCollection(String),

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

impl From<SinkError> for DomainError {
    fn from(err: SinkError) -> Self {
        DomainError::new(ErrorCode::PersistenceWrite, err.to_string())
    }
}

/// Port for appending assembled records to durable storage
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Append a record to a collection
    ///
    /// # Arguments
    /// * `collection_key` - Target collection, taken from the flow definition
    /// * `record` - The assembled record
    ///
    /// # Returns
    /// Identifier assigned to the stored record
    ///
    /// # Errors
    /// Returns `SinkError` if the write fails. Callers do not retry.
    async fn append_record(
        &self,
        collection_key: &str,
        record: &AssembledRecord,
    ) -> Result<RecordId, SinkError>;
}
