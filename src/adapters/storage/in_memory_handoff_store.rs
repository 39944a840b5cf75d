//! In-Memory Handoff Store Adapter
//!
//! Holds the latest hand-off snapshot in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::HandoffSnapshot;
use crate::ports::{HandoffError, HandoffStore};

/// In-memory single-slot store for hand-off snapshots
#[derive(Debug, Clone, Default)]
pub struct InMemoryHandoffStore {
    latest: Arc<RwLock<Option<HandoffSnapshot>>>,
    writes: Arc<RwLock<usize>>,
}

impl InMemoryHandoffStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently written snapshot
    pub async fn latest(&self) -> Option<HandoffSnapshot> {
        self.latest.read().await.clone()
    }

    /// Number of snapshots written so far
    pub async fn write_count(&self) -> usize {
        *self.writes.read().await
    }
}

#[async_trait]
impl HandoffStore for InMemoryHandoffStore {
    async fn write_snapshot(&self, snapshot: &HandoffSnapshot) -> Result<(), HandoffError> {
        *self.latest.write().await = Some(snapshot.clone());
        *self.writes.write().await += 1;
        Ok(())
    }
}
