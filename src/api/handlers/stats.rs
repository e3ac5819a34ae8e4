//! Handler for the stats endpoint.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns aggregate service statistics.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// Responds `200 OK` with `{ "urls": <live mapping count> }`.
pub async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let urls = state.service.stats().await?;

    Ok(Json(StatsResponse { urls }))
}
