//! Result cache for product listings.
//!
//! Provides a [`ListingCache`] trait with three implementations:
//! - [`MemoryCache`] - Process-local cache with lazy TTL expiry (default)
//! - [`RedisCache`] - Shared cache for multi-instance deployments
//! - [`NullCache`] - No-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::{DEFAULT_TTL, MemoryCache};
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, ListingCache};
