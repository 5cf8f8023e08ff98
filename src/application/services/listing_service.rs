//! Cached product listing.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::cache_key::CacheKey;
use crate::domain::entities::{ProductFilter, ProductPage};
use crate::domain::listing_query::compile_listing;
use crate::domain::repositories::ProductRepository;
use crate::error::AppError;
use crate::infrastructure::cache::ListingCache;

/// Serves listing pages, consulting the result cache before storage.
///
/// The cache is injected at construction, so each instance (and each test)
/// owns its own cache handle.
pub struct ListingService<R: ProductRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn ListingCache>,
}

impl<R: ProductRepository + ?Sized> ListingService<R> {
    /// Creates a new listing service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn ListingCache>) -> Self {
        Self { repository, cache }
    }

    /// Returns one page of products matching `filter`.
    ///
    /// # Flow
    ///
    /// 1. Derive the normalized cache key
    /// 2. On a fresh hit, return the cached page as is
    /// 3. On a miss, compile and run the query, assemble the page, store it
    ///
    /// Cache read and write failures are logged and treated as a miss or a
    /// skipped write. A storage failure propagates and nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Arc<ProductPage>, AppError> {
        let key = CacheKey::from_filter(filter);

        match self.cache.get(&key).await {
            Ok(Some(page)) => {
                debug!(key = %key.digest(), "Listing cache HIT");
                metrics::counter!("catalog_listing_cache_hits_total").increment(1);
                return Ok(page);
            }
            Ok(None) => debug!(key = %key.digest(), "Listing cache MISS"),
            Err(e) => warn!(key = %key.digest(), error = %e, "Listing cache read failed"),
        }
        metrics::counter!("catalog_listing_cache_misses_total").increment(1);

        let rows = self
            .repository
            .fetch_listing(compile_listing(filter))
            .await?;
        let page = Arc::new(ProductPage::from_rows(rows, filter.pagination));

        if let Err(e) = self.cache.put(&key, page.clone()).await {
            warn!(key = %key.digest(), error = %e, "Listing cache write failed");
        }

        Ok(page)
    }

    /// Drops every cached listing page and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the cache backend is unreachable.
    pub async fn clear_cache(&self) -> Result<usize, AppError> {
        let removed = self.cache.clear().await?;

        info!(removed, backend = self.cache.backend(), "Listing cache cleared");
        metrics::counter!("catalog_listing_cache_cleared_total").increment(1);

        Ok(removed)
    }

    /// Name of the cache backend in use.
    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend()
    }

    /// Checks that the cache backend answers.
    pub async fn cache_healthy(&self) -> bool {
        self.cache.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::product::fixtures::product;
    use crate::domain::entities::{ListingRow, PageRequest, SortMode};
    use crate::domain::listing_query::BoundValue;
    use crate::domain::repositories::MockProductRepository;
    use crate::infrastructure::cache::{CacheError, CacheResult, MemoryCache, NullCache};
    use async_trait::async_trait;
    use serde_json::json;

    fn rows(products: &[(i64, &str, f64)], total: i64) -> Vec<ListingRow> {
        products
            .iter()
            .map(|(id, name, price)| ListingRow {
                product: product(*id, name, *price),
                total_count: total,
            })
            .collect()
    }

    fn service(repo: MockProductRepository) -> ListingService<MockProductRepository> {
        ListingService::new(Arc::new(repo), Arc::new(MemoryCache::default()))
    }

    /// Cache whose every operation fails.
    struct BrokenCache;

    #[async_trait]
    impl ListingCache for BrokenCache {
        async fn get(&self, _key: &CacheKey) -> CacheResult<Option<Arc<ProductPage>>> {
            Err(CacheError::Unavailable("down".to_string()))
        }

        async fn put(&self, _key: &CacheKey, _page: Arc<ProductPage>) -> CacheResult<()> {
            Err(CacheError::Unavailable("down".to_string()))
        }

        async fn clear(&self) -> CacheResult<usize> {
            Err(CacheError::Unavailable("down".to_string()))
        }

        async fn health_check(&self) -> bool {
            false
        }

        fn backend(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_miss_queries_storage_then_hit_serves_cache() {
        let mut repo = MockProductRepository::new();
        let fixture = rows(&[(1, "Phone", 199.0)], 1);
        repo.expect_fetch_listing()
            .times(1)
            .returning(move |_| Ok(fixture.clone()));

        let service = service(repo);
        let filter = ProductFilter::default().with_brand("Acme");

        let first = service.list(&filter).await.unwrap();
        let second = service.list(&filter).await.unwrap();

        assert_eq!(first.products.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_equivalent_filters_share_entry() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch_listing()
            .times(1)
            .returning(|_| Ok(rows(&[(1, "Phone", 199.0)], 1)));

        let service = service(repo);
        let a = ProductFilter::default().with_categories([2, 1]).with_brand(" Acme");
        let b = ProductFilter::default().with_brand("Acme").with_categories([1, 2]);

        service.list(&a).await.unwrap();
        service.list(&b).await.unwrap();
    }

    #[tokio::test]
    async fn test_distinct_filters_query_separately() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch_listing()
            .times(2)
            .returning(|_| Ok(rows(&[(1, "Phone", 199.0)], 1)));

        let service = service(repo);
        service
            .list(&ProductFilter::default().with_max_price(10.0))
            .await
            .unwrap();
        service
            .list(&ProductFilter::default().with_max_price(20.0))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_cached() {
        let mut repo = MockProductRepository::new();
        let mut calls = 0;
        repo.expect_fetch_listing().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(AppError::internal("Database error", json!({})))
            } else {
                Ok(rows(&[(1, "Phone", 199.0)], 1))
            }
        });

        let service = service(repo);
        let filter = ProductFilter::default();

        let err = service.list(&filter).await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));

        let page = service.list(&filter).await.unwrap();
        assert_eq!(page.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_empty_result_has_zero_pages() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch_listing().returning(|_| Ok(vec![]));

        let page = service(repo)
            .list(&ProductFilter::default().with_search("nothing"))
            .await
            .unwrap();

        assert!(page.products.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[tokio::test]
    async fn test_cheap_second_page_of_five() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch_listing()
            .withf(|query| {
                query.sql.contains("ORDER BY p.price ASC")
                    && query.params.ends_with(&[BoundValue::BigInt(2), BoundValue::BigInt(2)])
            })
            .times(1)
            .returning(|_| Ok(rows(&[(3, "Cable", 30.0), (4, "Charger", 40.0)], 5)));

        let filter = ProductFilter::new(PageRequest::new(2, 2)).sorted_by(SortMode::Cheap);
        let page = service(repo).list(&filter).await.unwrap();

        let ids: Vec<i64> = page.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.page, 2);
        assert_eq!(page.pagination.limit, 2);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_requery() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch_listing()
            .times(5)
            .returning(|_| Ok(rows(&[(1, "Phone", 199.0)], 1)));

        let service = service(repo);
        let filters: Vec<ProductFilter> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|brand| ProductFilter::default().with_brand(brand))
            .collect();

        for filter in &filters {
            service.list(filter).await.unwrap();
        }
        assert_eq!(service.clear_cache().await.unwrap(), 4);

        service.list(&filters[0]).await.unwrap();
    }

    #[tokio::test]
    async fn test_broken_cache_fails_open_for_reads() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch_listing()
            .times(2)
            .returning(|_| Ok(rows(&[(1, "Phone", 199.0)], 1)));

        let service = ListingService::new(Arc::new(repo), Arc::new(BrokenCache));
        let filter = ProductFilter::default();

        assert!(service.list(&filter).await.is_ok());
        assert!(service.list(&filter).await.is_ok());
        assert!(!service.cache_healthy().await);
    }

    #[tokio::test]
    async fn test_broken_cache_clear_is_internal_error() {
        let service = ListingService::new(
            Arc::new(MockProductRepository::new()),
            Arc::new(BrokenCache),
        );

        let err = service.clear_cache().await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_null_cache_always_queries() {
        let mut repo = MockProductRepository::new();
        repo.expect_fetch_listing()
            .times(2)
            .returning(|_| Ok(rows(&[(1, "Phone", 199.0)], 1)));

        let service = ListingService::new(Arc::new(repo), Arc::new(NullCache));
        let filter = ProductFilter::default();

        service.list(&filter).await.unwrap();
        service.list(&filter).await.unwrap();
        assert_eq!(service.clear_cache().await.unwrap(), 0);
        assert_eq!(service.cache_backend(), "none");
    }
}
