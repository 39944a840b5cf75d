//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dialogue domain to external systems:
//! - `sink` - Record sinks (in-memory, YAML files)
//! - `storage` - Hand-off snapshot stores (in-memory, JSON file)
//! - `geolocation` - Configured or denied device position
//! - `display` - Terminal and recording display surfaces

pub mod display;
pub mod geolocation;
pub mod sink;
pub mod storage;

pub use display::{RecordingDisplay, RenderedFrame, TerminalDisplay};
pub use geolocation::FixedGeolocation;
pub use sink::{FileRecordSink, InMemoryRecordSink};
pub use storage::{FileHandoffStore, InMemoryHandoffStore};
