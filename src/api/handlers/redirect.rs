//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its long URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// Resolution goes through the shortener's read-through cache, so repeated
/// redirects for the same key do not touch the key store.
///
/// # Errors
///
/// Returns 404 Not Found if the key is not assigned.
pub async fn redirect_handler(
    Path(short_key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.shortener.resolve(&short_key).await?;

    Ok(Redirect::temporary(&long_url))
}
