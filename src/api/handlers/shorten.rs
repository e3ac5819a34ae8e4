//! Handlers for the shortening endpoints.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{
    BatchShortenItem, BatchShortenResult, ShortenRequest, ShortenResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a single URL.
///
/// # Endpoint
///
/// `POST /api/shorten`, body `{ "url": "<string>" }`.
///
/// Responds `201 Created` with `{ "result": "<base-url>/<code>" }`.
/// Re-submitting an already-shortened URL returns the existing code.
///
/// # Errors
///
/// - 400 for a missing or malformed URL
/// - 500 when the code space is exhausted or the store is unavailable
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let mapping = state.service.shorten(&payload.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            result: state.service.short_url(&mapping.code),
        }),
    ))
}

/// Creates short links for a batch of URLs.
///
/// # Endpoint
///
/// `POST /api/shorten/batch`, body
/// `[{ "correlation_id": "...", "original_url": "..." }, ...]`.
///
/// Responds `201 Created` with one result per input, in input order. Any
/// invalid URL fails the whole batch with 400.
pub async fn shorten_batch_handler(
    State(state): State<AppState>,
    Json(items): Json<Vec<BatchShortenItem>>,
) -> Result<(StatusCode, Json<Vec<BatchShortenResult>>), AppError> {
    for item in &items {
        item.validate()?;
    }

    let urls: Vec<String> = items.iter().map(|i| i.original_url.clone()).collect();
    let mappings = state.service.shorten_batch(&urls).await?;

    let results = items
        .into_iter()
        .zip(mappings)
        .map(|(item, mapping)| BatchShortenResult {
            correlation_id: item.correlation_id,
            short_url: state.service.short_url(&mapping.code),
        })
        .collect();

    Ok((StatusCode::CREATED, Json(results)))
}

/// Plain-text variant of shortening.
///
/// # Endpoint
///
/// `POST /`, body is the long URL as `text/plain`.
///
/// Responds `201 Created` with the short URL as plain text.
pub async fn shorten_text_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, String), AppError> {
    let mapping = state.service.shorten(body.trim()).await?;

    Ok((StatusCode::CREATED, state.service.short_url(&mapping.code)))
}
