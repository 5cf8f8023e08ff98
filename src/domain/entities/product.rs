//! Product entity and its image gallery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as read from storage.
///
/// Rows are enriched at read time with the names of their subcategory and
/// top-level category (left-joined, so either may be absent). Products are
/// snapshots: once read they are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub is_offer: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub advertising_start: Option<DateTime<Utc>>,
    pub advertising_end: Option<DateTime<Utc>>,
    pub subcategory_name: Option<String>,
    pub main_category_name: Option<String>,
}

/// A product row returned by the listing query.
///
/// `total_count` is the window-function count of every row matching the
/// filters, ignoring `LIMIT`/`OFFSET`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListingRow {
    #[sqlx(flatten)]
    pub product: Product,
    pub total_count: i64,
}

/// One image of a product gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductImage {
    pub url: String,
    pub is_main: bool,
}

/// A single product with its gallery, main image first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    pub images: Vec<ProductImage>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Builds a product with deterministic timestamps for tests.
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
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::days(id),
            advertising_start: None,
            advertising_end: None,
            subcategory_name: Some("Phones".to_string()),
            main_category_name: Some("Electronics".to_string()),
        }
    }
}

