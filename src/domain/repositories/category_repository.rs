//! Repository trait for category reads.

use crate::domain::entities::Category;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the category hierarchy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Lists every category, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all(&self) -> Result<Vec<Category>, AppError>;
}
