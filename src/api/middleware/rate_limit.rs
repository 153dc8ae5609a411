//! Per-client rate limiting using a token bucket.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limiter type applied to the public router.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter keyed by the client's socket address.
///
/// One request is replenished every `replenish_ms` milliseconds, up to a
/// bucket of `burst` requests. Requests over the limit receive
/// `429 Too Many Requests`.
///
/// The server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the peer address
/// is available.
///
/// # Errors
///
/// Returns an error if either parameter is zero.
pub fn layer(replenish_ms: u64, burst: u32) -> Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(burst)
        .finish()
        .context("Rate limit period and burst must be greater than 0")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
