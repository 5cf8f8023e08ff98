//! API route configuration.
//!
//! Routes are returned without rate limiting so they can be mounted directly
//! in tests; [`crate::routes::app_router`] adds the layers.

use crate::api::handlers::{
    advertising_handler, categories_handler, clear_cache_handler, featured_handler,
    listing_handler, offers_handler, product_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public catalog routes.
///
/// # Endpoints
///
/// Every endpoint is also served at its historical Italian path.
///
/// - `GET /listing`        (`/prodotti`)               - Filtered, paginated, cached listing
/// - `GET /listing/{id}`   (`/prodotti/{id}`)          - Product with image gallery
/// - `GET /categories`     (`/categorie-tree`)         - Category forest
/// - `GET /offers`         (`/offerte`)                - Products on offer
/// - `GET /featured`       (`/novita`)                 - Featured products
/// - `GET /advertising`    (`/prodotti-advertising`)   - Products in their advertising window
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/listing", get(listing_handler))
        .route("/prodotti", get(listing_handler))
        .route("/listing/{id}", get(product_handler))
        .route("/prodotti/{id}", get(product_handler))
        .route("/categories", get(categories_handler))
        .route("/categorie-tree", get(categories_handler))
        .route("/offers", get(offers_handler))
        .route("/offerte", get(offers_handler))
        .route("/featured", get(featured_handler))
        .route("/novita", get(featured_handler))
        .route("/advertising", get(advertising_handler))
        .route("/prodotti-advertising", get(advertising_handler))
}

/// Administrative routes.
///
/// - `POST /admin/clear-cache` - Drop every cached listing page
///
/// No authentication is applied here; deployments are expected to restrict
/// `/api/admin` at the reverse proxy.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/clear-cache", post(clear_cache_handler))
}
