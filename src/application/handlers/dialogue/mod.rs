//! Dialogue handlers - one per widget action that touches collaborators.

mod hand_off;
mod submit_turn;

pub use hand_off::{HandOffCommand, HandOffHandler, HandOffResult, HandOffSettings};
pub use submit_turn::{
    RecordWriter, SubmitTurnCommand, SubmitTurnError, SubmitTurnHandler, SubmitTurnResult,
    WriteOutcome,
};
