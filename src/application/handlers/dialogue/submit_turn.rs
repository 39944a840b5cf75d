//! SubmitTurn - Command handler for one user input.
//!
//! Runs the dialogue engine for one turn. The turn that completes a flow
//! hands back the assembled record; writing it is a separate
//! [`RecordWriter`] future the caller runs in the background so the
//! terminal message never waits on the sink.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::dialogue::{DialogueEngine, DialogueSession, PendingRecord, Stage};
use crate::domain::foundation::{DomainError, GeoPoint, RecordId, SessionId};
use crate::ports::{GeolocationProvider, RecordSink};

/// Command carrying the text the user typed or the chip value they clicked.
#[derive(Debug, Clone)]
pub struct SubmitTurnCommand {
    pub text: String,
}

impl SubmitTurnCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Result of a processed turn.
#[derive(Debug, Clone)]
pub struct SubmitTurnResult {
    /// Assistant messages appended during this turn.
    pub replies: Vec<String>,
    /// Stage after the turn.
    pub stage: Stage,
    /// Record completed by this turn, not yet written.
    pub pending: Option<PendingRecord>,
}

/// Errors that can occur when submitting a turn.
#[derive(Debug, Clone, Error)]
pub enum SubmitTurnError {
    /// Message content is empty or whitespace only.
    #[error("Validation error: message content cannot be empty")]
    EmptyContent,

    /// Domain error.
    #[error("Domain error: {0}")]
    DomainError(String),
}

impl From<DomainError> for SubmitTurnError {
    fn from(err: DomainError) -> Self {
        SubmitTurnError::DomainError(err.to_string())
    }
}

/// How a background record write ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Stored {
        collection_key: String,
        record_id: RecordId,
    },
    Failed {
        collection_key: String,
        error: String,
    },
}

impl WriteOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Writes one completed record, attaching the device position if granted.
#[derive(Clone)]
pub struct RecordWriter {
    sink: Arc<dyn RecordSink>,
    geolocation: Option<Arc<dyn GeolocationProvider>>,
}

impl RecordWriter {
    /// Owns its collaborators so the future can be spawned.
    pub async fn write(self, session_id: SessionId, pending: PendingRecord) -> WriteOutcome {
        let record = pending.record.with_location(self.locate().await);
        let collection_key = pending.collection_key;

        match self.sink.append_record(&collection_key, &record).await {
            Ok(record_id) => {
                info!(
                    session_id = %session_id,
                    record_id = %record_id,
                    collection = %collection_key,
                    "Registration stored"
                );
                WriteOutcome::Stored {
                    collection_key,
                    record_id,
                }
            }
            Err(err) => {
                warn!(
                    session_id = %session_id,
                    collection = %collection_key,
                    error = %err,
                    "Failed to store registration"
                );
                WriteOutcome::Failed {
                    collection_key,
                    error: err.to_string(),
                }
            }
        }
    }

    async fn locate(&self) -> Option<GeoPoint> {
        let provider = self.geolocation.as_ref()?;
        match provider.current_position().await {
            Ok(point) => Some(point),
            Err(reason) => {
                debug!(%reason, "Position unavailable; storing record without it");
                None
            }
        }
    }
}

/// Handler for SubmitTurn commands.
pub struct SubmitTurnHandler {
    engine: Arc<DialogueEngine>,
    writer: RecordWriter,
}

impl SubmitTurnHandler {
    pub fn new(engine: Arc<DialogueEngine>, sink: Arc<dyn RecordSink>) -> Self {
        Self {
            engine,
            writer: RecordWriter {
                sink,
                geolocation: None,
            },
        }
    }

    /// Attaches the device position to completed records.
    pub fn with_geolocation(mut self, provider: Arc<dyn GeolocationProvider>) -> Self {
        self.writer.geolocation = Some(provider);
        self
    }

    /// Writer for records this handler's turns complete.
    pub fn writer(&self) -> RecordWriter {
        self.writer.clone()
    }

    /// Processes one turn. Never touches the sink.
    pub fn handle(
        &self,
        session: &mut DialogueSession,
        cmd: SubmitTurnCommand,
    ) -> Result<SubmitTurnResult, SubmitTurnError> {
        let content = cmd.text.trim();
        if content.is_empty() {
            return Err(SubmitTurnError::EmptyContent);
        }

        let outcome = self.engine.handle_input(session, content)?;

        Ok(SubmitTurnResult {
            replies: outcome.replies,
            stage: outcome.stage,
            pending: outcome.completed,
        })
    }
}
