//! Transcript entries and quick-reply suggestions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// One bubble in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub text: String,
    /// Serialized as `isUser` so the web forms can read hand-off snapshots.
    #[serde(rename = "isUser")]
    pub is_from_user: bool,
    pub timestamp: Timestamp,
}

impl TranscriptEntry {
    /// Creates an entry typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_from_user: true,
            timestamp: Timestamp::now(),
        }
    }

    /// Creates an entry emitted by the assistant.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_from_user: false,
            timestamp: Timestamp::now(),
        }
    }
}

/// A quick-reply chip. Clicking it submits `value` as if typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub value: String,
}

impl Suggestion {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A chip whose submitted value is its own label.
    pub fn labelled(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            label,
        }
    }
}

/// Chips offered for yes/no questions and registration offers.
pub fn yes_no_suggestions() -> Vec<Suggestion> {
    vec![Suggestion::labelled("Sim"), Suggestion::labelled("Não")]
}
