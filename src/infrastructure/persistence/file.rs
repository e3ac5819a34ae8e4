//! File-backed mapping store.
//!
//! Keeps the full table in memory (same semantics as
//! [`MemoryStore`](super::MemoryStore)) and appends every accepted mapping to
//! a JSON-lines journal. The journal is replayed on startup, which makes the
//! store survive restarts without a database.

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingStore, StoreError};
use crate::infrastructure::persistence::MemoryStore;

/// Mapping store persisted to an append-only JSON-lines journal.
pub struct FileStore {
    table: MemoryStore,
    journal: Mutex<BufWriter<File>>,
}

impl FileStore {
    /// Opens the journal at `path`, replaying any existing records into the
    /// in-memory table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the journal cannot be read,
    /// parsed, or opened for appending.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let table = MemoryStore::new();

        let mut replayed = 0usize;
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                for line in contents.lines().filter(|l| !l.trim().is_empty()) {
                    let mapping: Mapping = serde_json::from_str(line).map_err(|e| {
                        StoreError::Unavailable(format!("corrupt journal record: {e}"))
                    })?;
                    table.try_insert(&mapping.code, &mapping.long_url).await?;
                    replayed += 1;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        info!(path = %path.display(), replayed, "journal opened");

        Ok(Self {
            table,
            journal: Mutex::new(BufWriter::new(file)),
        })
    }

    async fn append(&self, mapping: &Mapping) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(mapping)
            .map_err(|e| StoreError::Unavailable(format!("journal encode failed: {e}")))?;
        line.push('\n');

        let mut journal = self.journal.lock().await;
        journal.write_all(line.as_bytes()).await?;
        journal.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl MappingStore for FileStore {
    async fn try_insert(&self, code: &str, long_url: &str) -> Result<bool, StoreError> {
        if !self.table.try_insert(code, long_url).await? {
            return Ok(false);
        }

        // The code stays reserved in memory even if the append fails; the
        // caller sees the store as unavailable and no duplicate can be issued.
        let mapping = self
            .table
            .lookup(code)
            .await?
            .ok_or_else(|| StoreError::Unavailable("mapping vanished after insert".into()))?;
        self.append(&mapping).await?;

        Ok(true)
    }

    async fn lookup(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        self.table.lookup(code).await
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Mapping>, StoreError> {
        self.table.find_by_long_url(long_url).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.table.count().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        // Probe that the journal is still writable.
        let mut journal = self.journal.lock().await;
        journal.flush().await?;
        Ok(())
    }
}
