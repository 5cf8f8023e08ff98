//! Listing query parameters and response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

use crate::domain::entities::{
    DEFAULT_PAGE_SIZE, PageRequest, PaginationInfo, Product, ProductFilter, ProductPage, SortMode,
};

/// Raw listing query string.
///
/// Parsing is lenient: a malformed number, boolean or id is treated as if
/// the parameter were absent, never as a client error. Unknown parameters
/// are ignored, and a repeated parameter keeps its first value (see
/// [`ListingQuery::from_pairs`]).
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub brand: Option<String>,

    /// Comma-separated top-level category ids.
    pub categorie: Option<String>,

    /// Comma-separated subcategory ids.
    pub sottocategorie: Option<String>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default, rename = "prezzoMax")]
    pub prezzo_max: Option<f64>,

    pub offerta: Option<String>,
    pub novita: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListingQuery {
    /// Builds the query from raw `name=value` pairs in query-string order.
    ///
    /// The first occurrence of a repeated name wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut fields = Map::new();
        for (name, value) in pairs {
            fields.entry(name).or_insert(Value::String(value));
        }

        serde_json::from_value(Value::Object(fields)).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Ignoring unreadable listing query");
            Self::default()
        })
    }

    /// Normalizes the query into a validated filter.
    ///
    /// # Defaults
    ///
    /// - `page`: 1 (0 is raised to 1)
    /// - `limit`: 6, clamped to `1..=max_page_size`
    /// - `sort`: `new` for missing or unknown values
    pub fn into_filter(self, max_page_size: u32) -> ProductFilter {
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, max_page_size.max(1));
        let page = PageRequest::new(self.page.unwrap_or(1), limit);

        let mut filter = ProductFilter::new(page)
            .sorted_by(SortMode::from_param(self.sort.as_deref()))
            .with_categories(parse_ids(self.categorie.as_deref()))
            .with_subcategories(parse_ids(self.sottocategorie.as_deref()));

        if let Some(brand) = trimmed(self.brand) {
            filter = filter.with_brand(brand);
        }
        if let Some(max_price) = self.prezzo_max.filter(|p| p.is_finite() && *p >= 0.0) {
            filter = filter.with_max_price(max_price);
        }
        if let Some(term) = trimmed(self.search) {
            filter = filter.with_search(term);
        }
        if is_true(self.offerta.as_deref()) {
            filter = filter.on_offer();
        }
        if is_true(self.novita.as_deref()) {
            filter = filter.featured();
        }

        filter
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a comma-separated id list, skipping entries that are not integers.
fn parse_ids(value: Option<&str>) -> Vec<i64> {
    value
        .unwrap_or_default()
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

fn is_true(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let v = v.trim();
        v.eq_ignore_ascii_case("true") || v == "1"
    })
}

/// Listing response body.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub prodotti: Vec<Product>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata for responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl From<PaginationInfo> for PaginationMeta {
    fn from(info: PaginationInfo) -> Self {
        Self {
            total: info.total,
            page: info.page,
            limit: info.limit,
            total_pages: info.total_pages,
        }
    }
}

impl From<&ProductPage> for ListingResponse {
    fn from(page: &ProductPage) -> Self {
        Self {
            prodotti: page.products.clone(),
            pagination: page.pagination.into(),
        }
    }
}
