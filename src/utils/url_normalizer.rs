//! URL validation and normalization.
//!
//! Shortened inputs are stored in a canonical form so that identical URLs
//! deduplicate to a single code.

use url::Url;

/// Errors raised while normalizing a candidate URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("only HTTP and HTTPS URLs are accepted")]
    UnsupportedScheme,

    #[error("URL has no host")]
    MissingHost,
}

/// Normalizes a URL to its canonical form.
///
/// Rules:
///
/// 1. Scheme must be `http` or `https` (rejects `javascript:`, `file:`, ...)
/// 2. A non-empty host is required
/// 3. Hostname is lowercased
/// 4. Default ports (80/443) are stripped
/// 5. Fragments are stripped; path and query are preserved as-is
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for unparseable input,
/// [`UrlNormalizationError::UnsupportedScheme`] for non-HTTP(S) schemes and
/// [`UrlNormalizationError::MissingHost`] for host-less URLs.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedScheme),
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(UrlNormalizationError::MissingHost)?
        .to_ascii_lowercase();
    url.set_host(Some(&host))
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        // Cannot fail for http(s) URLs with a host.
        let _ = url.set_port(None);
    }

    Ok(url.to_string())
}
