//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `dialogue` - Sessions, question flows, and record assembly

pub mod dialogue;
pub mod foundation;
