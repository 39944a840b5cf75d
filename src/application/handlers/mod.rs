//! Application handlers.
//!
//! Command handlers that orchestrate dialogue operations and their ports.

pub mod dialogue;

pub use dialogue::{
    // Turn handling
    SubmitTurnCommand,
    SubmitTurnError,
    SubmitTurnHandler,
    SubmitTurnResult,
    // Background record writes
    RecordWriter,
    WriteOutcome,
    // Web form hand-off
    HandOffCommand,
    HandOffHandler,
    HandOffResult,
    HandOffSettings,
};
