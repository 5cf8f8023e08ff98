//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the query
//! compiler, repositories and the listing cache. Services consume repository
//! traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::listing_service::ListingService`] - Cached, filtered product listing
//! - [`services::catalog_service::CatalogService`] - Product detail, highlights and category tree

pub mod services;
