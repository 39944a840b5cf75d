//! Record Sink Adapters
//!
//! Implementations of the RecordSink port.
//!
//! - **FileRecordSink** - One YAML document per record, a directory per collection
//! - **InMemoryRecordSink** - Keeps records in memory (testing/development)

mod file_record_sink;
mod in_memory_record_sink;

pub use file_record_sink::FileRecordSink;
pub use in_memory_record_sink::InMemoryRecordSink;
