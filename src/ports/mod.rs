//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialogue domain and the outside world. Adapters implement these ports.
//!
//! - `RecordSink` - Durable append-only storage for completed registrations
//! - `GeolocationProvider` - Optional device position
//! - `HandoffStore` - Context handed to the full web forms
//! - `DisplaySurface` - Renders transcript and quick-reply chips

mod display_surface;
mod geolocation;
mod handoff_store;
mod record_sink;

pub use display_surface::{DisplayError, DisplaySurface};
pub use geolocation::{GeolocationProvider, GeolocationUnavailable};
pub use handoff_store::{HandoffError, HandoffStore};
pub use record_sink::{RecordSink, SinkError};
