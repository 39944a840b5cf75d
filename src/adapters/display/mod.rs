//! Display Adapters
//!
//! - **TerminalDisplay** - Prints assistant messages and chips to stdout
//! - **RecordingDisplay** - Captures rendered frames (testing/embedding)

mod recording;
mod terminal;

pub use recording::{RecordingDisplay, RenderedFrame};
pub use terminal::TerminalDisplay;
