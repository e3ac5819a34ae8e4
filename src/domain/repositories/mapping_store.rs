//! Storage contract for short code mappings.

use crate::domain::entities::Mapping;
use async_trait::async_trait;

/// Errors raised by a storage backend.
///
/// A code collision is NOT a store error; [`MappingStore::try_insert`] signals
/// it through its boolean return value.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not serve the request (I/O fault, lost connection).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Repository interface for the code → URL mapping table.
///
/// Implementations must be safe for many concurrent callers; `try_insert` is
/// the sole mutation point and provides atomic check-and-set semantics per
/// code.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryStore`] - guarded in-process table
/// - [`crate::infrastructure::persistence::FileStore`] - in-process table with an append-only journal
/// - [`crate::infrastructure::persistence::PgStore`] - PostgreSQL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Atomically inserts the mapping only if `code` is not already present.
    ///
    /// Returns `false` on collision without error. Two concurrent calls with
    /// the same code result in exactly one `true`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on backend faults.
    async fn try_insert(&self, code: &str, long_url: &str) -> Result<bool, StoreError>;

    /// Finds a mapping by its short code.
    ///
    /// May proceed concurrently with unrelated inserts.
    async fn lookup(&self, code: &str) -> Result<Option<Mapping>, StoreError>;

    /// Finds a mapping by its (normalized) long URL.
    ///
    /// Reverse lookup used to deduplicate identical inputs.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Mapping>, StoreError>;

    /// Counts live mappings.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Probes backend availability. Drives the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
