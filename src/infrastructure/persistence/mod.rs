//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters for every value.
//!
//! # Repositories
//!
//! - [`PgProductRepository`] - Listings, highlights and single-product lookup
//! - [`PgCategoryRepository`] - Category hierarchy

pub mod pg_category_repository;
pub mod pg_product_repository;

pub use pg_category_repository::PgCategoryRepository;
pub use pg_product_repository::PgProductRepository;
