//! Listing cache trait and error types.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cache_key::CacheKey;
use crate::domain::entities::ProductPage;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Time-expiring store of listing pages keyed by normalized request.
///
/// `get`, `put` and `clear` are atomic with respect to one another. Entries
/// are immutable snapshots: concurrent misses on one key may both write, and
/// the last write wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - Process-local cache (default)
/// - [`crate::infrastructure::cache::RedisCache`] - Shared Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait ListingCache: Send + Sync {
    /// Returns the cached page for `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(page))` on a hit younger than the TTL
    /// - `Ok(None)` when the key is absent or its entry has expired
    ///
    /// # Errors
    ///
    /// Returns an error only if the cache itself is unusable. Callers treat
    /// errors as misses.
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<Arc<ProductPage>>>;

    /// Stores `page` under `key`, replacing any existing entry and restarting
    /// its TTL.
    ///
    /// # Errors
    ///
    /// Returns an error only if the cache itself is unusable. Callers log and
    /// continue.
    async fn put(&self, key: &CacheKey, page: Arc<ProductPage>) -> CacheResult<()>;

    /// Removes every entry regardless of age and returns how many were
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be reached; nothing is removed in
    /// that case.
    async fn clear(&self) -> CacheResult<usize>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name used in health reports and logs.
    fn backend(&self) -> &'static str;
}
