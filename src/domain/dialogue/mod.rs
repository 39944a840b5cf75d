//! Dialogue module - the conversational registration assistant.
//!
//! A session alternates between free conversation and guided question
//! flows. Free text goes through the [`FlowSelector`]; answers inside a flow
//! go through the [`SequenceStepper`]; a completed flow is turned into an
//! [`AssembledRecord`] by the [`RecordAssembler`].

mod assembler;
pub mod catalog;
mod engine;
mod extractor;
mod flow;
mod handoff;
mod message;
mod selector;
mod session;
mod stage;
mod stepper;

pub use assembler::{
    AssembledRecord, AssemblyError, RecordAssembler, ORIGIN_CHATBOT, STATUS_PENDING,
};
pub use catalog::FlowCatalog;
pub use engine::{DialogueEngine, PendingRecord, TurnOutcome, APOLOGY_MESSAGE};
pub use extractor::{extract_hints, ExtractedHints};
pub use flow::{AnswerShape, FieldMapping, FlowBuilder, FlowDefinition, FlowId, QuestionSpec};
pub use handoff::HandoffSnapshot;
pub use message::{yes_no_suggestions, Suggestion, TranscriptEntry};
pub use selector::{
    tokenize, CannedReply, FlowSelector, SelectionContext, SelectorOutcome, SelectorTables,
};
pub use session::DialogueSession;
pub use stage::Stage;
pub use stepper::{SequenceStepper, StepOutcome};
