// JSON-file-backed custom model store
//
// Load semantics: a missing file is an empty collection; a file that exists
// but fails to parse is also treated as empty, with the parse error logged
// at warn. Writes rewrite the whole file.

use crate::models::CustomAgentRecord;
use chrono::{DateTime, Duration, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors from store write paths. Reads never fail; see `load`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write custom model store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode custom model store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed collection of user-created models
pub struct CustomAgentStore {
    path: PathBuf,
    /// Serializes every load-then-write sequence. The file has no other
    /// writers in this process, so an in-process lock is sufficient.
    guard: Mutex<()>,
}

impl CustomAgentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record. Never fails: a missing file is empty, a malformed
    /// file is empty with a warning.
    pub async fn load(&self) -> Vec<CustomAgentRecord> {
        let _guard = self.guard.lock().await;
        self.read_records().await
    }

    /// Append records to the store, preserving everything already there.
    pub async fn append(&self, records: Vec<CustomAgentRecord>) -> Result<(), StoreError> {
        let _guard = self.guard.lock().await;
        let mut all = self.read_records().await;
        all.extend(records);
        self.write_records(&all).await
    }

    /// Drop every record whose age meets or exceeds `max_age`, rewrite the
    /// store, and return the retained set.
    pub async fn prune(
        &self,
        now: DateTime<Utc>,
        max_age: Duration,
    ) -> Result<Vec<CustomAgentRecord>, StoreError> {
        let _guard = self.guard.lock().await;
        let all = self.read_records().await;
        let retained: Vec<CustomAgentRecord> = all
            .into_iter()
            .filter(|record| now - record.created_at < max_age)
            .collect();
        self.write_records(&retained).await?;
        Ok(retained)
    }

    async fn read_records(&self) -> Vec<CustomAgentRecord> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read custom model store; treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "custom model store is malformed; treating as empty");
                Vec::new()
            }
        }
    }

    async fn write_records(&self, records: &[CustomAgentRecord]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, encoded)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
    }
}
