//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache for resolved code → URL pairs.
///
/// Implementations must be thread-safe and fail open: a cache fault degrades
/// to a store lookup, never to a request failure.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the target URL for a short code.
    ///
    /// Returns `Ok(None)` on miss or on a swallowed backend error.
    async fn get_url(&self, code: &str) -> CacheResult<Option<String>>;

    /// Stores a code → URL pair with an optional TTL override.
    ///
    /// Implementations log and swallow backend errors.
    async fn set_url(&self, code: &str, long_url: &str, ttl_seconds: Option<u64>)
    -> CacheResult<()>;

    /// Reports whether the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
