//! Terminal display surface.
//!
//! Prints only the entries added since the previous render, followed by the
//! current chips, so a stdin session reads like a chat log.

use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::dialogue::{Suggestion, TranscriptEntry};
use crate::ports::{DisplayError, DisplaySurface};

#[derive(Debug, Clone, Default)]
pub struct TerminalDisplay {
    shown: Arc<Mutex<usize>>,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn format_entry(entry: &TranscriptEntry) -> String {
        let speaker = if entry.is_from_user { "Você" } else { "Assistente" };
        format!("{}: {}", speaker, entry.text)
    }

    fn format_chips(suggestions: &[Suggestion]) -> Option<String> {
        if suggestions.is_empty() {
            return None;
        }
        let labels: Vec<String> = suggestions
            .iter()
            .map(|s| format!("[{}]", s.label))
            .collect();
        Some(format!("  {}", labels.join(" ")))
    }
}

#[async_trait]
impl DisplaySurface for TerminalDisplay {
    async fn render(
        &self,
        transcript: &[TranscriptEntry],
        suggestions: &[Suggestion],
    ) -> Result<(), DisplayError> {
        let mut shown = self.shown.lock().await;
        // A shorter transcript means a new session.
        if transcript.len() < *shown {
            *shown = 0;
        }

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for entry in transcript[*shown..].iter().filter(|e| !e.is_from_user) {
            writeln!(out, "{}", Self::format_entry(entry))
                .map_err(|e| DisplayError::RenderFailed(e.to_string()))?;
        }
        if let Some(chips) = Self::format_chips(suggestions) {
            writeln!(out, "{}", chips).map_err(|e| DisplayError::RenderFailed(e.to_string()))?;
        }
        out.flush()
            .map_err(|e| DisplayError::RenderFailed(e.to_string()))?;

        *shown = transcript.len();
        Ok(())
    }
}
