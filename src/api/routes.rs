//! API route configuration.

use crate::api::handlers::{resolve_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Shortener API routes.
///
/// # Endpoints
///
/// - `POST /shorten`        - Assign a short key to a URL
/// - `GET  /shorten/{key}`  - Resolve a short key to its URL (plain text)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/{key}", get(resolve_handler))
}
