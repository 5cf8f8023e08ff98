//! Handler for single-product lookup.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::product::ProductDetailResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns one product with its image gallery.
///
/// # Endpoint
///
/// `GET /api/listing/{id}` (also `GET /api/prodotti/{id}`)
///
/// # Errors
///
/// - 400 if `id` is not an integer
/// - 404 if no product has this id
pub async fn product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let id: i64 = id.trim().parse().map_err(|_| {
        AppError::bad_request("Product id must be an integer", json!({ "id": id }))
    })?;

    let detail = state.catalog_service.product_detail(id).await?;

    Ok(Json(detail.into()))
}
