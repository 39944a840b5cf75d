//! Storage Adapters
//!
//! Implementations of the HandoffStore port for the context the web forms
//! pick up after a hand-off.
//!
//! ## Available Adapters
//!
//! - **FileHandoffStore** - Writes the snapshot as a JSON file
//! - **InMemoryHandoffStore** - Keeps the snapshot in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileHandoffStore, InMemoryHandoffStore};
//!
//! // Production: file-based storage
//! let store = FileHandoffStore::new("./data/chat_context.json");
//!
//! // Testing: in-memory storage
//! let store = InMemoryHandoffStore::new();
//! ```

mod file_handoff_store;
mod in_memory_handoff_store;

pub use file_handoff_store::FileHandoffStore;
pub use in_memory_handoff_store::InMemoryHandoffStore;
