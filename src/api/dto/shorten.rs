//! DTOs for the shortening endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be an absolute http(s) URL).
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
}

/// Response carrying the public short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub result: String,
}

/// One entry of a batch shortening request.
///
/// `correlation_id` is an opaque caller-side key echoed back in the response
/// so results can be matched to inputs.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchShortenItem {
    #[validate(length(min = 1, message = "correlation_id must not be empty"))]
    pub correlation_id: String,

    #[validate(length(min = 1, message = "original_url must not be empty"))]
    pub original_url: String,
}

/// One entry of a batch shortening response.
#[derive(Debug, Serialize)]
pub struct BatchShortenResult {
    pub correlation_id: String,
    pub short_url: String,
}
