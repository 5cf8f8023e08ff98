//! Repository trait for product reads.

use crate::domain::entities::{ListingRow, Product, ProductDetail};
use crate::domain::listing_query::CompiledQuery;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the product catalog.
///
/// The repository executes queries produced by
/// [`crate::domain::listing_query`]; it never builds filter SQL itself.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProductRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Executes a compiled listing query.
    ///
    /// Every returned row carries the window count of all matching rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn fetch_listing(&self, query: CompiledQuery) -> Result<Vec<ListingRow>, AppError>;

    /// Executes a compiled query returning plain product rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn fetch_products(&self, query: CompiledQuery) -> Result<Vec<Product>, AppError>;

    /// Finds a product and its gallery by primary key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ProductDetail))` if found
    /// - `Ok(None)` if no product has this id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<ProductDetail>, AppError>;

    /// Checks that the storage backend answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
