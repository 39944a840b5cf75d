//! Dialogue engine.
//!
//! Ties the selector, stepper and assembler together for one turn of user
//! input. Synchronous and side-effect free apart from the session it is
//! handed; persisting the assembled record is left to the caller.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::assembler::{AssembledRecord, RecordAssembler};
use super::catalog::FlowCatalog;
use super::flow::{FlowDefinition, FlowId};
use super::message::{yes_no_suggestions, Suggestion};
use super::selector::{FlowSelector, SelectionContext, SelectorOutcome};
use super::session::DialogueSession;
use super::stage::Stage;
use super::stepper::{SequenceStepper, StepOutcome};
use crate::domain::foundation::{DomainError, ErrorCode, Sector, Timestamp};

/// Shown when a turn could not be completed as intended.
pub const APOLOGY_MESSAGE: &str = "Desculpe, ocorreu um erro. Tente novamente mais tarde.";

/// A completed record waiting to be written to its collection.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRecord {
    pub collection_key: String,
    pub record: AssembledRecord,
}

/// What one turn produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Assistant messages appended during the turn, in order.
    pub replies: Vec<String>,
    /// Stage after the turn.
    pub stage: Stage,
    /// Present only on the turn that completed a flow.
    pub completed: Option<PendingRecord>,
}

#[derive(Debug, Clone)]
pub struct DialogueEngine {
    catalog: Arc<FlowCatalog>,
    selector: FlowSelector,
}

impl DialogueEngine {
    pub fn new(catalog: Arc<FlowCatalog>, selector: FlowSelector) -> Self {
        Self { catalog, selector }
    }

    /// Engine over the built-in flows and reply tables.
    pub fn standard() -> Result<Self, DomainError> {
        Ok(Self::new(
            Arc::new(FlowCatalog::standard()?),
            FlowSelector::default(),
        ))
    }

    pub fn catalog(&self) -> &FlowCatalog {
        &self.catalog
    }

    /// Opens the widget on `session`. The welcome is only shown once.
    pub fn open(&self, session: &mut DialogueSession, sector: Option<Sector>) {
        if sector.is_some() {
            session.set_preferred_sector(sector);
        }
        if session.is_fresh() {
            session.push_bot(self.selector.tables().welcome.clone());
            session.set_suggestions(self.topic_suggestions());
        }
    }

    /// Processes one user input. The text is recorded verbatim.
    ///
    /// # Errors
    ///
    /// Only on broken session invariants; regular input always yields a
    /// reply.
    pub fn handle_input(
        &self,
        session: &mut DialogueSession,
        text: &str,
    ) -> Result<TurnOutcome, DomainError> {
        session.push_user(text);
        let mut turn = Turn::default();

        match session.active_flow().cloned() {
            None => self.freeform_turn(session, text, &mut turn)?,
            Some(flow_id) => self.sequence_turn(session, &flow_id, text, &mut turn)?,
        }

        debug!(
            session_id = %session.id(),
            stage = ?session.stage(),
            replies = turn.replies.len(),
            "Turn processed"
        );

        Ok(TurnOutcome {
            replies: turn.replies,
            stage: session.stage(),
            completed: turn.completed,
        })
    }

    fn freeform_turn(
        &self,
        session: &mut DialogueSession,
        text: &str,
        turn: &mut Turn,
    ) -> Result<(), DomainError> {
        let context = SelectionContext {
            pending_offer: session.pending_offer(),
            preferred_sector: session.preferred_sector(),
        };

        match self.selector.select(text, context, &self.catalog) {
            SelectorOutcome::StartFlow { flow } => {
                let definition = self.definition(&flow)?;
                session.start_flow(flow.clone())?;
                info!(session_id = %session.id(), flow_id = %flow, "Registration flow started");

                let first = SequenceStepper::current_prompt(session, definition)?;
                self.present(session, definition, first, turn);
            }
            SelectorOutcome::Canned { reply, offers } => {
                session.set_pending_offer(offers);
                let chips = match offers {
                    Some(_) => yes_no_suggestions(),
                    None => self.topic_suggestions(),
                };
                turn.say(session, reply);
                session.set_suggestions(chips);
            }
            SelectorOutcome::Fallback { reply } => {
                session.set_pending_offer(None);
                turn.say(session, reply);
                session.set_suggestions(self.topic_suggestions());
            }
        }
        Ok(())
    }

    fn sequence_turn(
        &self,
        session: &mut DialogueSession,
        flow_id: &FlowId,
        text: &str,
        turn: &mut Turn,
    ) -> Result<(), DomainError> {
        let Some(definition) = self.catalog.get(flow_id) else {
            warn!(
                session_id = %session.id(),
                flow_id = %flow_id,
                "Active flow is not in the catalog; abandoning it"
            );
            session.finish_flow()?;
            turn.say(session, APOLOGY_MESSAGE);
            session.set_suggestions(self.topic_suggestions());
            return Ok(());
        };

        let outcome = SequenceStepper::step(session, definition, text)?;
        self.present(session, definition, outcome, turn);
        Ok(())
    }

    /// Appends the step's message, updates chips, and assembles on
    /// completion.
    fn present(
        &self,
        session: &mut DialogueSession,
        flow: &FlowDefinition,
        outcome: StepOutcome,
        turn: &mut Turn,
    ) {
        match outcome {
            StepOutcome::Prompt {
                text, suggestions, ..
            } => {
                turn.say(session, text);
                session.set_suggestions(suggestions);
            }
            StepOutcome::Completed { terminal, answers } => {
                turn.say(session, terminal);
                session.set_suggestions(self.topic_suggestions());

                match RecordAssembler::assemble(flow, &answers, session.id(), Timestamp::now()) {
                    Ok(record) => {
                        info!(
                            session_id = %session.id(),
                            flow_id = %flow.id(),
                            "Registration flow completed"
                        );
                        turn.completed = Some(PendingRecord {
                            collection_key: flow.collection_key().to_string(),
                            record,
                        });
                    }
                    Err(err) => {
                        let err = DomainError::from(err);
                        warn!(
                            session_id = %session.id(),
                            code = %err.code,
                            "Record assembly failed: {}",
                            err.message()
                        );
                        turn.say(session, APOLOGY_MESSAGE);
                    }
                }
            }
        }
    }

    fn definition(&self, id: &FlowId) -> Result<&FlowDefinition, DomainError> {
        self.catalog.get(id).ok_or_else(|| {
            DomainError::new(ErrorCode::FlowNotFound, format!("Unknown flow '{}'", id))
                .with_detail("flow_id", id.as_str())
        })
    }

    fn topic_suggestions(&self) -> Vec<Suggestion> {
        self.selector.tables().topic_suggestions.clone()
    }
}

#[derive(Default)]
struct Turn {
    replies: Vec<String>,
    completed: Option<PendingRecord>,
}

impl Turn {
    fn say(&mut self, session: &mut DialogueSession, text: impl Into<String>) {
        let text = text.into();
        session.push_bot(text.clone());
        self.replies.push(text);
    }
}
