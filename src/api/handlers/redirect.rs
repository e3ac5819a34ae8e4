//! Handler for short URL resolution.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}` and `GET /api/{code}`
///
/// # Request Flow
///
/// 1. Check cache for the code
/// 2. On cache miss, resolve against the mapping store
/// 3. Asynchronously update the cache (fire-and-forget)
/// 4. Return `302 Found` with `Location`
///
/// Cache faults fall back to the store; only a store fault fails the request.
///
/// # Errors
///
/// Returns 404 when the code is unknown, 500 when the store is unavailable.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = match state.cache.get_url(&code).await {
        Ok(Some(cached_url)) => {
            debug!(%code, "cache hit");
            cached_url
        }
        Ok(None) => {
            let long_url = state.service.resolve(&code).await?;

            let cache = state.cache.clone();
            let code = code.clone();
            let url = long_url.clone();
            tokio::spawn(async move {
                if let Err(e) = cache.set_url(&code, &url, None).await {
                    error!("Failed to cache resolved URL: {}", e);
                }
            });

            long_url
        }
        Err(e) => {
            error!("Cache error: {}", e);
            state.service.resolve(&code).await?
        }
    };

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]))
}
