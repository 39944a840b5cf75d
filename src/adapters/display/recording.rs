//! Recording display surface for tests and embedding.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::{Suggestion, TranscriptEntry};
use crate::ports::{DisplayError, DisplaySurface};

/// One call to `render`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub transcript: Vec<TranscriptEntry>,
    pub suggestions: Vec<Suggestion>,
}

/// Keeps every rendered frame in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    frames: Arc<RwLock<Vec<RenderedFrame>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn frames(&self) -> Vec<RenderedFrame> {
        self.frames.read().await.clone()
    }

    pub async fn last_frame(&self) -> Option<RenderedFrame> {
        self.frames.read().await.last().cloned()
    }
}

#[async_trait]
impl DisplaySurface for RecordingDisplay {
    async fn render(
        &self,
        transcript: &[TranscriptEntry],
        suggestions: &[Suggestion],
    ) -> Result<(), DisplayError> {
        self.frames.write().await.push(RenderedFrame {
            transcript: transcript.to_vec(),
            suggestions: suggestions.to_vec(),
        });
        Ok(())
    }
}
