//! Redis-backed listing cache.

use std::sync::Arc;
use std::time::Duration;

use super::service::{CacheError, CacheResult, ListingCache};
use crate::domain::cache_key::CacheKey;
use crate::domain::entities::ProductPage;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Number of keys requested per `SCAN` round trip while clearing.
const SCAN_BATCH: usize = 500;

/// Redis cache shared by every service instance.
///
/// Pages are stored as JSON under `listing:<sha256 of the cache key>` and
/// expire on the Redis side after the configured TTL. Reads and writes are
/// fail-open: errors are logged and degrade to a miss or a skipped write.
pub struct RedisCache {
    client: ConnectionManager,
    ttl_seconds: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, ttl: Duration) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds: ttl.as_secs().max(1),
            key_prefix: "listing:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &CacheKey) -> String {
        format!("{}{}", self.key_prefix, key.digest())
    }
}

#[async_trait]
impl ListingCache for RedisCache {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<Arc<ProductPage>>> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&redis_key).await {
            Ok(Some(payload)) => match serde_json::from_str::<ProductPage>(&payload) {
                Ok(page) => Ok(Some(Arc::new(page))),
                Err(e) => {
                    warn!(key = %redis_key, error = %e, "Discarding undecodable cache entry");
                    Ok(None)
                }
            },
            Ok(None) => Ok(None),
            Err(e) => {
                error!(key = %redis_key, error = %e, "Redis GET error");
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &CacheKey, page: Arc<ProductPage>) -> CacheResult<()> {
        let redis_key = self.build_key(key);
        let payload = serde_json::to_string(page.as_ref())
            .map_err(|e| CacheError::OperationError(format!("Failed to encode page: {}", e)))?;
        let mut conn = self.client.clone();

        match conn
            .set_ex::<_, _, ()>(&redis_key, payload, self.ttl_seconds)
            .await
        {
            Ok(_) => {
                debug!(key = %redis_key, ttl = self.ttl_seconds, "Cache SET");
                Ok(())
            }
            Err(e) => {
                warn!(key = %redis_key, error = %e, "Redis SET error");
                Ok(())
            }
        }
    }

    async fn clear(&self) -> CacheResult<usize> {
        let mut conn = self.client.clone();
        let pattern = format!("{}*", self.key_prefix);
        let mut cursor: u64 = 0;
        let mut removed = 0usize;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(|e| CacheError::OperationError(format!("Redis SCAN failed: {}", e)))?;

            if !keys.is_empty() {
                let deleted: usize = conn
                    .del(&keys)
                    .await
                    .map_err(|e| CacheError::OperationError(format!("Redis DEL failed: {}", e)))?;
                removed += deleted;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(removed)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
