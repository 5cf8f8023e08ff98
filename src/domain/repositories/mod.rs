//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the storage collaborator: the domain compiles
//! queries, repositories execute them and map rows back to entities.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ProductRepository`] - Listing, highlight and single-product reads
//! - [`CategoryRepository`] - Category hierarchy reads

pub mod category_repository;
pub mod product_repository;

pub use category_repository::CategoryRepository;
pub use product_repository::ProductRepository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
