//! Process-local listing cache.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::time::Instant;
use tracing::debug;

use super::service::{CacheError, CacheResult, ListingCache};
use crate::domain::cache_key::CacheKey;
use crate::domain::entities::ProductPage;

/// Default time-to-live of a cached listing page.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    page: Arc<ProductPage>,
    created_at: Instant,
}

/// In-memory cache of listing pages.
///
/// Expiry is lazy: an entry older than the TTL is reported as a miss but
/// stays in the map until it is overwritten or the cache is cleared, so
/// [`ListingCache::clear`] counts expired entries too.
///
/// By default the cache grows without bound. [`MemoryCache::bounded`] caps the
/// number of entries and evicts the least recently used one when full.
///
/// All operations take a single mutex, which makes them atomic with respect
/// to each other; none of them awaits while holding it.
pub struct MemoryCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl MemoryCache {
    /// Creates an unbounded cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(LruCache::unbounded()),
            ttl,
        }
    }

    /// Creates a cache holding at most `capacity` entries.
    pub fn bounded(ttl: Duration, capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    fn lock(&self) -> CacheResult<MutexGuard<'_, LruCache<CacheKey, CacheEntry>>> {
        self.entries
            .lock()
            .map_err(|_| CacheError::Unavailable("memory cache lock poisoned".to_string()))
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[async_trait]
impl ListingCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<Arc<ProductPage>>> {
        let mut entries = self.lock()?;

        match entries.get(key) {
            Some(entry) if entry.created_at.elapsed() < self.ttl => Ok(Some(entry.page.clone())),
            Some(_) => {
                debug!(key = %key.digest(), "Cache entry expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &CacheKey, page: Arc<ProductPage>) -> CacheResult<()> {
        let entry = CacheEntry {
            page,
            created_at: Instant::now(),
        };

        if let Some((evicted, _)) = self.lock()?.push(key.clone(), entry)
            && &evicted != key
        {
            debug!(key = %evicted.digest(), "Cache entry evicted");
        }

        Ok(())
    }

    async fn clear(&self) -> CacheResult<usize> {
        let mut entries = self.lock()?;
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    async fn health_check(&self) -> bool {
        self.lock().is_ok()
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
