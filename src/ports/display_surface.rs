//! Display Surface Port - Where the transcript and chips are rendered.

use async_trait::async_trait;

use crate::domain::dialogue::{Suggestion, TranscriptEntry};

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Failed to render: {0}")]
    RenderFailed(String),
}

/// Port for presenting the conversation to the user
///
/// Called after every processed widget command with the full transcript
/// and the chips valid for the next input.
#[async_trait]
pub trait DisplaySurface: Send + Sync {
    async fn render(
        &self,
        transcript: &[TranscriptEntry],
        suggestions: &[Suggestion],
    ) -> Result<(), DisplayError>;
}
