//! API route configuration.

use crate::api::handlers::{
    redirect_handler, shorten_batch_handler, shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create a short link (JSON)
/// - `POST /shorten/batch` - Create short links in bulk
/// - `GET  /stats`         - Aggregate statistics
/// - `GET  /{code}`        - Resolve a short code (302 redirect)
///
/// Literal segments win over the `{code}` capture, so `/shorten` and `/stats`
/// are never shadowed.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/batch", post(shorten_batch_handler))
        .route("/stats", get(stats_handler))
        .route("/{code}", get(redirect_handler))
}
