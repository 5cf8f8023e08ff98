#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use catalog_listing::api;
use catalog_listing::api::handlers::health_handler;
use catalog_listing::domain::entities::{
    Category, ListingRow, Product, ProductDetail, ProductImage,
};
use catalog_listing::domain::listing_query::{BoundValue, CompiledQuery};
use catalog_listing::domain::repositories::{CategoryRepository, ProductRepository};
use catalog_listing::error::AppError;
use catalog_listing::infrastructure::cache::MemoryCache;
use catalog_listing::state::AppState;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub fn product(id: i64, name: &str, price: f64) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: Some(format!("{name} description")),
        brand: Some("Acme".to_string()),
        price,
        image_url: Some(format!("/img/{id}.jpg")),
        category_id: Some(1),
        subcategory_id: Some(10),
        is_offer: false,
        is_featured: false,
        created_at: base_time() + Duration::days(id),
        advertising_start: None,
        advertising_end: None,
        subcategory_name: Some("Phones".to_string()),
        main_category_name: Some("Electronics".to_string()),
    }
}

/// Five products with distinct prices, inserted out of price order.
pub fn five_products() -> Vec<Product> {
    vec![
        product(1, "Tablet", 300.0),
        product(2, "Cable", 10.0),
        product(3, "Phone", 200.0),
        product(4, "Case", 20.0),
        product(5, "Charger", 30.0),
    ]
}

/// In-memory product store that interprets compiled queries just enough
/// for HTTP tests: ordering, flag predicates, the advertising window and
/// `LIMIT`/`OFFSET`. Filter predicates are not evaluated.
pub struct FixtureProducts {
    products: Vec<Product>,
    images: Vec<(i64, String)>,
    listing_calls: AtomicUsize,
    failing: AtomicBool,
}

impl FixtureProducts {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            images: Vec::new(),
            listing_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    pub fn with_image(mut self, product_id: i64, url: &str) -> Self {
        self.images.push((product_id, url.to_string()));
        self
    }

    /// Number of listing queries executed so far.
    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail like an unreachable database.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::internal("Database error", json!({})))
        } else {
            Ok(())
        }
    }

    fn ordered(&self, sql: &str) -> Vec<Product> {
        let mut products = self.products.clone();
        if sql.contains("ORDER BY p.price ASC") {
            products.sort_by(|a, b| a.price.total_cmp(&b.price).then(a.id.cmp(&b.id)));
        } else if sql.contains("ORDER BY p.price DESC") {
            products.sort_by(|a, b| b.price.total_cmp(&a.price).then(a.id.cmp(&b.id)));
        } else if sql.contains("ORDER BY p.name ASC") {
            products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        } else {
            products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        }

        if sql.contains("p.is_offer = true") {
            products.retain(|p| p.is_offer);
        }
        if sql.contains("p.is_featured = true") {
            products.retain(|p| p.is_featured);
        }
        products
    }
}

fn big_int(value: Option<&BoundValue>) -> usize {
    match value {
        Some(BoundValue::BigInt(v)) => usize::try_from(*v).unwrap_or(0),
        other => panic!("expected a BigInt parameter, got {other:?}"),
    }
}

#[async_trait]
impl ProductRepository for FixtureProducts {
    async fn fetch_listing(&self, query: CompiledQuery) -> Result<Vec<ListingRow>, AppError> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let params = &query.params;
        let offset = big_int(params.last());
        let limit = big_int(params.iter().rev().nth(1));

        let matching = self.ordered(&query.sql);
        let total = matching.len() as i64;

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|product| ListingRow {
                product,
                total_count: total,
            })
            .collect())
    }

    async fn fetch_products(&self, query: CompiledQuery) -> Result<Vec<Product>, AppError> {
        self.check()?;

        let mut products = self.ordered(&query.sql);
        match query.params.first() {
            Some(BoundValue::Timestamp(now)) => {
                products.retain(|p| {
                    matches!(
                        (p.advertising_start, p.advertising_end),
                        (Some(start), Some(end)) if start <= *now && *now <= end
                    )
                })
            },
            Some(BoundValue::BigInt(limit)) => products.truncate(*limit as usize),
            _ => {}
        }
        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductDetail>, AppError> {
        self.check()?;

        let Some(product) = self.products.iter().find(|p| p.id == id).cloned() else {
            return Ok(None);
        };

        let mut images: Vec<ProductImage> = product
            .image_url
            .iter()
            .map(|url| ProductImage {
                url: url.clone(),
                is_main: true,
            })
            .collect();
        images.extend(
            self.images
                .iter()
                .filter(|(product_id, _)| *product_id == id)
                .map(|(_, url)| ProductImage {
                    url: url.clone(),
                    is_main: false,
                }),
        );

        Ok(Some(ProductDetail { product, images }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

/// In-memory category store returning rows ordered by name.
pub struct FixtureCategories {
    categories: Vec<Category>,
}

impl FixtureCategories {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CategoryRepository for FixtureCategories {
    async fn list_all(&self) -> Result<Vec<Category>, AppError> {
        let mut rows = self.categories.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }
}

pub fn sample_categories() -> Vec<Category> {
    vec![
        Category::new(1, "Electronics", None),
        Category::new(2, "Clothing", None),
        Category::new(10, "Phones", Some(1)),
        Category::new(11, "Laptops", Some(1)),
        Category::new(20, "Shirts", Some(2)),
        Category::new(99, "Orphan", Some(404)),
    ]
}

/// Builds state around fixture repositories and a fresh memory cache.
pub fn create_test_state(products: Arc<FixtureProducts>, categories: Vec<Category>) -> AppState {
    AppState::new(
        products,
        Arc::new(FixtureCategories::new(categories)),
        Arc::new(MemoryCache::default()),
        100,
    )
}

/// The application routes without rate limiting.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest(
            "/api",
            api::routes::public_routes().merge(api::routes::admin_routes()),
        )
        .with_state(state)
}
