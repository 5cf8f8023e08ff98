//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`   - Health check: database and cache (public)
//! - `/api/*`         - Catalog JSON API (public, rate limited)
//! - `/api/admin/*`   - Administrative endpoints (strict rate limit)
//! - everything else  - Static storefront files
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter for admin routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory served for paths no route matches
///
/// # Errors
///
/// Returns an error if a rate limiter cannot be configured.
pub fn app_router(state: AppState, static_dir: &str) -> anyhow::Result<NormalizePath<Router>> {
    let api_router = Router::new()
        .merge(api::routes::public_routes().layer(rate_limit::layer()?))
        .merge(api::routes::admin_routes().layer(rate_limit::admin_layer()?));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
