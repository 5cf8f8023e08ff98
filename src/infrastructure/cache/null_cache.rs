//! No-op cache implementation for disabled caching.

use std::sync::Arc;

use super::service::{CacheResult, ListingCache};
use crate::domain::cache_key::CacheKey;
use crate::domain::entities::ProductPage;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that stores nothing.
///
/// Every lookup is a miss, so every listing request reaches the database.
/// Selected with `CACHE_BACKEND=none` and used as the fallback when Redis
/// cannot be reached at startup.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingCache for NullCache {
    async fn get(&self, _key: &CacheKey) -> CacheResult<Option<Arc<ProductPage>>> {
        Ok(None)
    }

    async fn put(&self, _key: &CacheKey, _page: Arc<ProductPage>) -> CacheResult<()> {
        Ok(())
    }

    async fn clear(&self) -> CacheResult<usize> {
        Ok(0)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}
