//! Domain layer containing catalog entities and query logic.
//!
//! Everything here is independent of HTTP and of the concrete database
//! driver: the query compiler only emits SQL text and bound values, and the
//! repository traits describe what the storage collaborator must provide.
//!
//! # Architecture
//!
//! - [`entities`] - Products, categories and listing request/result types
//! - [`listing_query`] - Compiles a listing request into parametrized SQL
//! - [`cache_key`] - Normalized identity of a listing request
//! - [`category_tree`] - Builds the category forest from flat rows
//! - [`repositories`] - Data access trait definitions
//!
//! # Listing Flow
//!
//! 1. The API layer validates raw query parameters into a
//!    [`entities::ProductFilter`]
//! 2. [`cache_key::CacheKey`] identifies the request in the result cache
//! 3. On a miss, [`listing_query::compile_listing`] builds the query
//! 4. [`repositories::ProductRepository`] executes it and the rows become a
//!    [`entities::ProductPage`]

pub mod cache_key;
pub mod category_tree;
pub mod entities;
pub mod listing_query;
pub mod repositories;
