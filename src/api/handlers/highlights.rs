//! Handlers for the home page product strips.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::domain::entities::Product;
use crate::error::AppError;
use crate::state::AppState;

/// Up to ten products on offer.
///
/// `GET /api/offers` (also `GET /api/offerte`)
pub async fn offers_handler(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.catalog_service.offers().await?))
}

/// Up to ten featured products.
///
/// `GET /api/featured` (also `GET /api/novita`)
pub async fn featured_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.catalog_service.featured().await?))
}

/// Products currently inside their advertising window, newest first.
///
/// `GET /api/advertising` (also `GET /api/prodotti-advertising`)
pub async fn advertising_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.catalog_service.advertised(Utc::now()).await?))
}
