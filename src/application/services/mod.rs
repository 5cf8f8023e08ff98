//! Business logic services for the application layer.

pub mod catalog_service;
pub mod listing_service;

pub use catalog_service::CatalogService;
pub use listing_service::ListingService;
