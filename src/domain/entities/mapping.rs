//! Mapping entity representing a shortened URL association.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The association between a short code and its target URL.
///
/// A mapping is created exactly once and never mutated afterwards. `code` is
/// unique across all live mappings. Serde derives exist for the file backend's
/// journal format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mapping {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new mapping stamped with the current time.
    pub fn new(code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            long_url: long_url.into(),
            created_at: Utc::now(),
        }
    }
}
