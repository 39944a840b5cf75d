//! DialogueSession - one conversation instance.
//!
//! Owns the stage, the answers collected for the running flow, the
//! transcript and the chips offered for the next input. State only changes
//! through the methods below, which enforce the stage state machine.

use serde::{Deserialize, Serialize};

use super::flow::FlowId;
use super::message::{Suggestion, TranscriptEntry};
use super::stage::Stage;
use crate::domain::foundation::{DomainError, ErrorCode, Sector, SessionId, StateMachine};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueSession {
    id: SessionId,
    stage: Stage,
    active_flow: Option<FlowId>,
    collected_answers: Vec<String>,
    transcript: Vec<TranscriptEntry>,
    suggestion_set: Vec<Suggestion>,
    preferred_sector: Option<Sector>,
    pending_offer: Option<Sector>,
}

impl DialogueSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            stage: Stage::Freeform,
            active_flow: None,
            collected_answers: Vec::new(),
            transcript: Vec::new(),
            suggestion_set: Vec::new(),
            preferred_sector: None,
            pending_offer: None,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn active_flow(&self) -> Option<&FlowId> {
        self.active_flow.as_ref()
    }

    pub fn collected_answers(&self) -> &[String] {
        &self.collected_answers
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn suggestion_set(&self) -> &[Suggestion] {
        &self.suggestion_set
    }

    pub fn preferred_sector(&self) -> Option<Sector> {
        self.preferred_sector
    }

    pub fn pending_offer(&self) -> Option<Sector> {
        self.pending_offer
    }

    /// Returns true until the first assistant message has been shown.
    pub fn is_fresh(&self) -> bool {
        self.transcript.is_empty()
    }

    // === Transcript and chips ===

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.transcript.push(TranscriptEntry::user(text));
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.transcript.push(TranscriptEntry::bot(text));
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestion_set = suggestions;
    }

    pub fn set_preferred_sector(&mut self, sector: Option<Sector>) {
        self.preferred_sector = sector;
    }

    pub fn set_pending_offer(&mut self, sector: Option<Sector>) {
        self.pending_offer = sector;
    }

    // === Flow lifecycle ===

    /// Enters `Sequence(0)` of `flow`.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if a flow is already running.
    pub fn start_flow(&mut self, flow: FlowId) -> Result<(), DomainError> {
        self.stage = self.stage.transition_to(Stage::Sequence(0))?;
        self.active_flow = Some(flow);
        self.collected_answers.clear();
        self.pending_offer = None;
        Ok(())
    }

    /// Stores the answer for the current question and advances the pointer.
    ///
    /// Returns the new question index. Any text is accepted.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` when no flow is running.
    pub fn record_answer(&mut self, answer: impl Into<String>) -> Result<usize, DomainError> {
        let index = self.stage.question_index().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Cannot record an answer outside a guided flow",
            )
        })?;
        self.stage = self.stage.transition_to(Stage::Sequence(index + 1))?;
        self.collected_answers.push(answer.into());
        Ok(index + 1)
    }

    /// Leaves the running flow, returning the answers it collected.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` when no flow is running.
    pub fn finish_flow(&mut self) -> Result<Vec<String>, DomainError> {
        self.stage = self.stage.transition_to(Stage::Freeform)?;
        self.active_flow = None;
        Ok(std::mem::take(&mut self.collected_answers))
    }
}

impl Default for DialogueSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow_id() -> FlowId {
        FlowId::new("rural-registration")
    }

    #[test]
    fn new_session_is_freeform_and_empty() {
        let session = DialogueSession::new();
        assert_eq!(session.stage(), Stage::Freeform);
        assert!(session.active_flow().is_none());
        assert!(session.collected_answers().is_empty());
        assert!(session.is_fresh());
    }

    #[test]
    fn start_flow_enters_sequence_zero() {
        let mut session = DialogueSession::new();
        session.set_pending_offer(Some(Sector::Pesca));
        session.start_flow(flow_id()).unwrap();

        assert_eq!(session.stage(), Stage::Sequence(0));
        assert_eq!(session.active_flow(), Some(&flow_id()));
        assert_eq!(session.pending_offer(), None);
    }

    #[test]
    fn start_flow_twice_is_rejected() {
        let mut session = DialogueSession::new();
        session.start_flow(flow_id()).unwrap();
        let err = session.start_flow(flow_id()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn record_answer_appends_and_advances() {
        let mut session = DialogueSession::new();
        session.start_flow(flow_id()).unwrap();

        assert_eq!(session.record_answer("Sítio Boa Esperança").unwrap(), 1);
        assert_eq!(session.record_answer("Pessoa Física").unwrap(), 2);
        assert_eq!(session.stage(), Stage::Sequence(2));
        assert_eq!(
            session.collected_answers(),
            &["Sítio Boa Esperança".to_string(), "Pessoa Física".to_string()]
        );
    }

    #[test]
    fn record_answer_in_freeform_fails() {
        let mut session = DialogueSession::new();
        let err = session.record_answer("oi").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(session.collected_answers().is_empty());
    }

    #[test]
    fn finish_flow_resets_and_returns_answers() {
        let mut session = DialogueSession::new();
        session.start_flow(flow_id()).unwrap();
        session.record_answer("a").unwrap();

        let answers = session.finish_flow().unwrap();
        assert_eq!(answers, vec!["a".to_string()]);
        assert_eq!(session.stage(), Stage::Freeform);
        assert!(session.active_flow().is_none());
        assert!(session.collected_answers().is_empty());
    }

    #[test]
    fn finish_flow_in_freeform_fails() {
        let mut session = DialogueSession::new();
        assert!(session.finish_flow().is_err());
    }

    #[test]
    fn transcript_is_append_only_in_order() {
        let mut session = DialogueSession::new();
        session.push_bot("Olá!");
        session.push_user("oi");

        let texts: Vec<_> = session.transcript().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Olá!", "oi"]);
        assert!(!session.is_fresh());
    }
}
