//! Handler for the product listing.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::listing::{ListingQuery, ListingResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists products matching the query, one page at a time.
///
/// # Endpoint
///
/// `GET /api/listing` (also `GET /api/prodotti`)
///
/// # Query Parameters
///
/// - `brand`: case-insensitive brand match
/// - `categorie`, `sottocategorie`: comma-separated ids, combined with OR
/// - `prezzoMax`: price ceiling
/// - `offerta`, `novita`: `true` restricts to offers / featured products
/// - `search`: substring of name, description or brand
/// - `sort`: `cheap`, `expensive`, `new` (default) or `alphabetical`
/// - `page` (default 1), `limit` (default 6)
///
/// Malformed values are ignored rather than rejected; a repeated parameter
/// keeps its first value.
///
/// # Response
///
/// ```json
/// {
///   "prodotti": [ { "id": 3, "name": "Cable", "price": 9.9, ... } ],
///   "pagination": { "total": 13, "page": 1, "limit": 6, "totalPages": 3 }
/// }
/// ```
///
/// Results are served from the listing cache for five minutes.
pub async fn listing_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListingResponse>, AppError> {
    let filter = ListingQuery::from_pairs(pairs).into_filter(state.max_page_size);
    let page = state.listing_service.list(&filter).await?;

    Ok(Json(ListingResponse::from(page.as_ref())))
}
