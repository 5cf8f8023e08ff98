//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::{CatalogService, ListingService};
use crate::domain::repositories::{CategoryRepository, ProductRepository};
use crate::infrastructure::cache::ListingCache;

/// Listing service over any product repository.
pub type SharedListingService = ListingService<dyn ProductRepository>;

/// Catalog service over any product and category repository.
pub type SharedCatalogService = CatalogService<dyn ProductRepository, dyn CategoryRepository>;

/// Application state, cloned per request.
///
/// Services are built once at start-up around a single cache instance and
/// shared through `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    pub listing_service: Arc<SharedListingService>,
    pub catalog_service: Arc<SharedCatalogService>,
    /// Upper bound applied to the `limit` query parameter.
    pub max_page_size: u32,
}

impl AppState {
    /// Wires services around the given repositories and cache.
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
        cache: Arc<dyn ListingCache>,
        max_page_size: u32,
    ) -> Self {
        Self {
            listing_service: Arc::new(ListingService::new(products.clone(), cache)),
            catalog_service: Arc::new(CatalogService::new(products, categories)),
            max_page_size,
        }
    }
}
