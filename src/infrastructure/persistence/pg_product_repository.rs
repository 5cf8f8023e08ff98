//! PostgreSQL implementation of product repository.

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use std::sync::Arc;

use crate::domain::entities::{ListingRow, Product, ProductDetail, ProductImage};
use crate::domain::listing_query::{
    BoundValue, CompiledQuery, PRODUCT_BY_ID_SQL, PRODUCT_GALLERY_SQL,
};
use crate::domain::repositories::ProductRepository;
use crate::error::AppError;

/// PostgreSQL repository for product reads.
///
/// Listing SQL is assembled at runtime by the query compiler, so rows are
/// mapped with `sqlx::FromRow` and every compiled value is sent as a bound
/// parameter.
pub struct PgProductRepository {
    pool: Arc<PgPool>,
}

impl PgProductRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Binds compiled values in placeholder order.
fn bind_params<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: Vec<BoundValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for param in params {
        query = match param {
            BoundValue::Text(value) => query.bind(value),
            BoundValue::Float(value) => query.bind(value),
            BoundValue::BigInt(value) => query.bind(value),
            BoundValue::Timestamp(value) => query.bind(value),
        };
    }
    query
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn fetch_listing(&self, query: CompiledQuery) -> Result<Vec<ListingRow>, AppError> {
        let CompiledQuery { sql, params } = query;

        let rows = bind_params(sqlx::query_as::<_, ListingRow>(&sql), params)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn fetch_products(&self, query: CompiledQuery) -> Result<Vec<Product>, AppError> {
        let CompiledQuery { sql, params } = query;

        let rows = bind_params(sqlx::query_as::<_, Product>(&sql), params)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductDetail>, AppError> {
        let product = sqlx::query_as::<_, Product>(PRODUCT_BY_ID_SQL)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(product) = product else {
            return Ok(None);
        };

        let images = sqlx::query_as::<_, ProductImage>(PRODUCT_GALLERY_SQL)
            .bind(id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(Some(ProductDetail { product, images }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
