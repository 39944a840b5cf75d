//! File-based Handoff Store Adapter
//!
//! Writes the hand-off snapshot as a single JSON document, the same shape the
//! web forms read from browser storage. Each write replaces the previous one.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::dialogue::HandoffSnapshot;
use crate::ports::{HandoffError, HandoffStore};

/// File-based single-slot store for hand-off snapshots
#[derive(Debug, Clone)]
pub struct FileHandoffStore {
    path: PathBuf,
}

impl FileHandoffStore {
    /// Create a store writing to `path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileHandoffStore::new("./data/chat_context.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HandoffStore for FileHandoffStore {
    async fn write_snapshot(&self, snapshot: &HandoffSnapshot) -> Result<(), HandoffError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| HandoffError::IoError(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| HandoffError::SerializationFailed(e.to_string()))?;

        fs::write(&self.path, json)
            .await
            .map_err(|e| HandoffError::IoError(e.to_string()))?;

        Ok(())
    }
}
