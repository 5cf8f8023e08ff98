//! Handlers for administrative endpoints.

use axum::{Json, extract::State};

use crate::api::dto::admin::ClearCacheResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Drops every cached listing page.
///
/// # Endpoint
///
/// `POST /api/admin/clear-cache`
///
/// # Response
///
/// ```json
/// { "success": true, "message": "Listing cache cleared", "deletedItems": 4 }
/// ```
///
/// # Errors
///
/// Returns 500 if the cache backend cannot be reached.
pub async fn clear_cache_handler(
    State(state): State<AppState>,
) -> Result<Json<ClearCacheResponse>, AppError> {
    let deleted_items = state.listing_service.clear_cache().await?;

    Ok(Json(ClearCacheResponse {
        success: true,
        message: "Listing cache cleared".to_string(),
        deleted_items,
    }))
}
