//! PostgreSQL implementation of category repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Category;
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;

/// PostgreSQL repository for the category hierarchy.
pub struct PgCategoryRepository {
    pool: Arc<PgPool>,
}

impl PgCategoryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list_all(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, parent_id
            FROM categories
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }
}
