//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{key}`                - Short key redirect
//! - `GET  /health`               - Health check: key store and cache
//! - `POST /api/shorten`          - Shorten a long URL
//! - `GET  /api/shorten/{key}`    - Resolve a short key to its long URL
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes without transport-level middleware.
///
/// Integration tests use this directly because the rate limiter needs the
/// peer socket address, which in-process test transports do not provide.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{key}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limiter, see [`crate::api::middleware::rate_limit::layer`]
pub fn app_router(state: AppState, rate_limit: RateLimitLayer) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state).layer(rate_limit))
}
