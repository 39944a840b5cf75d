//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The `host` module owns the session, feeds widget commands to the
//! handlers one at a time and collects background record writes.

pub mod handlers;
pub mod host;

pub use handlers::{
    HandOffCommand, HandOffHandler, HandOffResult, HandOffSettings, RecordWriter,
    SubmitTurnCommand, SubmitTurnError, SubmitTurnHandler, SubmitTurnResult, WriteOutcome,
};
pub use host::{DialogueHost, HandOffReply, HostError, WidgetCommand, WidgetHandle};
