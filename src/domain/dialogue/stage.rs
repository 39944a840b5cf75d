//! Dialogue stage state machine.
//!
//! A session is either chatting freely or walking a guided flow one
//! question at a time.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a session currently is.
///
/// - `Freeform`: no guided flow running, input goes to the flow selector
/// - `Sequence(index)`: a flow is running and `index` points at the
///   question whose answer is expected next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Freeform,
    Sequence(usize),
}

impl Stage {
    /// Returns true if no guided flow is running.
    pub fn is_freeform(&self) -> bool {
        matches!(self, Self::Freeform)
    }

    /// Returns the current question pointer, if a flow is running.
    pub fn question_index(&self) -> Option<usize> {
        match self {
            Self::Freeform => None,
            Self::Sequence(index) => Some(*index),
        }
    }
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Stage::*;
        match (self, target) {
            // Starting a flow always begins at its first question
            (Freeform, Sequence(0)) => true,
            // One answer per turn, no skips and no going back
            (Sequence(from), Sequence(to)) => *to == from + 1,
            // Flow finished or abandoned
            (Sequence(_), Freeform) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Freeform => vec![Self::Sequence(0)],
            Self::Sequence(index) => vec![Self::Sequence(index + 1), Self::Freeform],
        }
    }
}
