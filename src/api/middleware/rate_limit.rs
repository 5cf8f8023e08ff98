//! Per-client rate limiting using the token bucket algorithm.

use anyhow::Context;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limiting layer keyed by peer IP.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for public catalog endpoints.
///
/// # Limits
///
/// - **Rate**: one token every 50 ms (20 requests per second)
/// - **Burst**: 200 requests
///
/// Listing pages fire several requests at once (listing, categories,
/// highlights), hence the generous burst. Requests exceeding the limit
/// receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn layer() -> anyhow::Result<RateLimitLayer> {
    build(Duration::from_millis(50), 200)
}

/// Creates a stricter rate limiter for administrative endpoints.
///
/// # Limits
///
/// - **Rate**: one token every 6 seconds
/// - **Burst**: 5 requests
pub fn admin_layer() -> anyhow::Result<RateLimitLayer> {
    build(Duration::from_secs(6), 5)
}

fn build(period: Duration, burst: u32) -> anyhow::Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .period(period)
        .burst_size(burst)
        .finish()
        .context("rate limiter needs a non-zero period and burst size")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
