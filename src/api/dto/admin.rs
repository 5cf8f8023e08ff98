//! DTOs for administrative endpoints.

use serde::Serialize;

/// Result of clearing the listing cache.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheResponse {
    pub success: bool,
    pub message: String,
    pub deleted_items: usize,
}
