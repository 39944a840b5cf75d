//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the registration assistant.

mod errors;
mod geo;
mod ids;
mod sector;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use geo::GeoPoint;
pub use ids::{RecordId, SessionId};
pub use sector::Sector;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
