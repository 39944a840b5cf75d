//! Hand-off snapshot written when the user moves to the full web form.

use serde::{Deserialize, Serialize};

use super::extractor::{extract_hints, ExtractedHints};
use super::flow::FlowId;
use super::message::TranscriptEntry;
use super::session::DialogueSession;
use crate::domain::foundation::{GeoPoint, Sector, Timestamp};

/// Conversation context the web form reads to pre-fill itself.
///
/// Field names follow the `chatContext` entry the forms already parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffSnapshot {
    #[serde(rename = "ultimasMensagens")]
    pub transcript_tail: Vec<TranscriptEntry>,
    #[serde(rename = "setor")]
    pub sector: Sector,
    #[serde(rename = "flowId", default, skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<FlowId>,
    #[serde(rename = "dadosParciais")]
    pub extracted_hints: ExtractedHints,
    #[serde(rename = "userLocation", default, skip_serializing_if = "Option::is_none")]
    pub user_location: Option<GeoPoint>,
    #[serde(rename = "capturadoEm")]
    pub captured_at: Timestamp,
}

impl HandoffSnapshot {
    /// Captures the last `tail_len` transcript entries plus hints extracted
    /// from the whole transcript.
    pub fn capture(
        session: &DialogueSession,
        sector: Sector,
        tail_len: usize,
        user_location: Option<GeoPoint>,
    ) -> Self {
        let transcript = session.transcript();
        let start = transcript.len().saturating_sub(tail_len);

        Self {
            transcript_tail: transcript[start..].to_vec(),
            sector,
            flow_id: session.active_flow().cloned(),
            extracted_hints: extract_hints(transcript),
            user_location,
            captured_at: Timestamp::now(),
        }
    }

    /// Route of the web form that picks this snapshot up.
    pub fn form_route(&self) -> &'static str {
        self.sector.form_route()
    }
}
