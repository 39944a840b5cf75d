//! In-Memory Record Sink Adapter
//!
//! Keeps appended records in memory, grouped by collection.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::AssembledRecord;
use crate::domain::foundation::RecordId;
use crate::ports::{RecordSink, SinkError};

/// In-memory sink for assembled records
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSink {
    collections: Arc<RwLock<HashMap<String, Vec<(RecordId, AssembledRecord)>>>>,
}

impl InMemoryRecordSink {
    /// Create a new in-memory sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Records appended to a collection, oldest first
    pub async fn records(&self, collection_key: &str) -> Vec<AssembledRecord> {
        self.collections
            .read()
            .await
            .get(collection_key)
            .map(|entries| entries.iter().map(|(_, r)| r.clone()).collect())
            .unwrap_or_default()
    }

    /// Total number of records across collections
    pub async fn record_count(&self) -> usize {
        self.collections.read().await.values().map(Vec::len).sum()
    }

    /// Clear all stored records (useful for tests)
    pub async fn clear(&self) {
        self.collections.write().await.clear();
    }
}

#[async_trait]
impl RecordSink for InMemoryRecordSink {
    async fn append_record(
        &self,
        collection_key: &str,
        record: &AssembledRecord,
    ) -> Result<RecordId, SinkError> {
        let id = RecordId::new();
        self.collections
            .write()
            .await
            .entry(collection_key.to_string())
            .or_default()
            .push((id, record.clone()));
        Ok(id)
    }
}
