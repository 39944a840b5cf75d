//! File-based Record Sink Adapter
//!
//! Appends each record as its own YAML document on disk, one directory per
//! collection, so the files can be inspected or bulk-imported later.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::dialogue::AssembledRecord;
use crate::domain::foundation::RecordId;
use crate::ports::{RecordSink, SinkError};

/// File-based sink for assembled records
#[derive(Debug, Clone)]
pub struct FileRecordSink {
    base_path: PathBuf,
}

impl FileRecordSink {
    /// Create a new file sink with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let sink = FileRecordSink::new("./data/records");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Directory holding a collection's records
    fn collection_dir(&self, collection_key: &str) -> PathBuf {
        self.base_path.join(collection_key)
    }

    /// Path of one stored record
    pub fn record_path(&self, collection_key: &str, record_id: RecordId) -> PathBuf {
        self.collection_dir(collection_key)
            .join(format!("{}.yaml", record_id))
    }

    fn check_collection(collection_key: &str) -> Result<(), SinkError> {
        let valid = !collection_key.is_empty()
            && collection_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(())
        } else {
            Err(SinkError::UnknownCollection(collection_key.to_string()))
        }
    }
}

#[async_trait]
impl RecordSink for FileRecordSink {
    async fn append_record(
        &self,
        collection_key: &str,
        record: &AssembledRecord,
    ) -> Result<RecordId, SinkError> {
        Self::check_collection(collection_key)?;

        let dir = self.collection_dir(collection_key);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| SinkError::IoError(e.to_string()))?;

        let yaml = serde_yaml::to_string(record)
            .map_err(|e| SinkError::SerializationFailed(e.to_string()))?;

        let record_id = RecordId::new();
        fs::write(self.record_path(collection_key, record_id), yaml)
            .await
            .map_err(|e| SinkError::IoError(e.to_string()))?;

        Ok(record_id)
    }
}
