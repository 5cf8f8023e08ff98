//! Uncached catalog reads: product detail, highlights and categories.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::category_tree::{CategoryTree, build_forest};
use crate::domain::entities::{Product, ProductDetail};
use crate::domain::listing_query::{compile_advertised, compile_featured, compile_offers};
use crate::domain::repositories::{CategoryRepository, ProductRepository};
use crate::error::AppError;

/// Service for catalog reads that bypass the listing cache.
pub struct CatalogService<P: ProductRepository + ?Sized, C: CategoryRepository + ?Sized> {
    product_repository: Arc<P>,
    category_repository: Arc<C>,
}

impl<P: ProductRepository + ?Sized, C: CategoryRepository + ?Sized> CatalogService<P, C> {
    /// Creates a new catalog service.
    pub fn new(product_repository: Arc<P>, category_repository: Arc<C>) -> Self {
        Self {
            product_repository,
            category_repository,
        }
    }

    /// Retrieves a product with its gallery.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no product has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn product_detail(&self, id: i64) -> Result<ProductDetail, AppError> {
        self.product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found", json!({ "id": id })))
    }

    /// Up to ten products on offer, newest first.
    pub async fn offers(&self) -> Result<Vec<Product>, AppError> {
        self.product_repository
            .fetch_products(compile_offers())
            .await
    }

    /// Up to ten featured products, newest first.
    pub async fn featured(&self) -> Result<Vec<Product>, AppError> {
        self.product_repository
            .fetch_products(compile_featured())
            .await
    }

    /// Products whose advertising window contains `now`, newest first.
    pub async fn advertised(&self, now: DateTime<Utc>) -> Result<Vec<Product>, AppError> {
        self.product_repository
            .fetch_products(compile_advertised(now))
            .await
    }

    /// Builds the category forest from the current category rows.
    ///
    /// Rows arrive ordered by name, so siblings are name-ordered. Categories
    /// whose parent does not exist are left out.
    pub async fn category_tree(&self) -> Result<Vec<CategoryTree>, AppError> {
        let rows = self.category_repository.list_all().await?;
        Ok(build_forest(rows))
    }

    /// Checks that the database answers.
    pub async fn database_healthy(&self) -> bool {
        self.product_repository.ping().await.is_ok()
    }
}
