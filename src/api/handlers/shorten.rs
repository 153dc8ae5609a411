//! Handlers for the shorten and resolve endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Assigns a short key to a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "custom_key": "abcdef"   // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_key": "abcdef",
///   "long_url": "https://example.com",
///   "short_url": "http://localhost:3000/abcdef",
///   "created_at": "2024-01-15T10:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the URL or custom key is malformed
/// - 409 Conflict if the custom key is already assigned
/// - 503 Service Unavailable if no free key could be generated
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let entry = state
        .shortener
        .shorten(payload.url, payload.custom_key)
        .await?;

    let short_url = state
        .shortener
        .get_short_url(&state.base_url, &entry.short_key);

    Ok(Json(ShortenResponse {
        short_key: entry.short_key,
        long_url: entry.long_url,
        short_url,
        created_at: entry.created_at,
    }))
}

/// Returns the long URL for a short key as plain text.
///
/// # Endpoint
///
/// `GET /api/shorten/{key}`
///
/// # Errors
///
/// Returns 404 Not Found if the key is not assigned.
pub async fn resolve_handler(
    Path(short_key): Path<String>,
    State(state): State<AppState>,
) -> Result<String, AppError> {
    state.shortener.resolve(&short_key).await
}
