//! Handler for the category forest.

use axum::{Json, extract::State};

use crate::domain::category_tree::CategoryTree;
use crate::error::AppError;
use crate::state::AppState;

/// Returns every root category with its nested subcategories.
///
/// # Endpoint
///
/// `GET /api/categories` (also `GET /api/categorie-tree`)
///
/// # Response
///
/// ```json
/// [
///   { "id": 1, "name": "Electronics", "parent_id": null,
///     "children": [ { "id": 10, "name": "Phones", "parent_id": 1, "children": [] } ] }
/// ]
/// ```
pub async fn categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryTree>>, AppError> {
    let forest = state.catalog_service.category_tree().await?;
    Ok(Json(forest))
}
