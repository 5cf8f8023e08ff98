//! Normalized cache keys for listing requests.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Value, json};
use sha2::{Digest, Sha256};

use crate::domain::entities::ProductFilter;

/// Canonical identity of a listing request.
///
/// Built from the validated [`ProductFilter`], so two requests that differ
/// only in parameter order, whitespace or spelled-out defaults map to the
/// same key. Parameter names are sorted lexicographically and every value is
/// JSON-encoded, which keeps `name=value` pairs unambiguous even when user
/// text contains the `&` or `=` delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_filter(filter: &ProductFilter) -> Self {
        let mut params: BTreeMap<&'static str, Value> = BTreeMap::new();

        if let Some(brand) = non_blank(filter.brand.as_deref()) {
            params.insert("brand", json!(brand));
        }
        if !filter.category_ids.is_empty() {
            params.insert("categorie", json!(filter.category_ids));
        }
        params.insert("limit", json!(filter.pagination.page_size()));
        if filter.featured {
            params.insert("novita", json!(true));
        }
        if filter.on_offer {
            params.insert("offerta", json!(true));
        }
        params.insert("page", json!(filter.pagination.page()));
        if let Some(max_price) = filter.max_price {
            params.insert("prezzoMax", json!(max_price));
        }
        if let Some(term) = non_blank(filter.search.as_deref()) {
            params.insert("search", json!(term));
        }
        params.insert("sort", json!(filter.sort.as_str()));
        if !filter.subcategory_ids.is_empty() {
            params.insert("sottocategorie", json!(filter.subcategory_ids));
        }

        let canonical = params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        Self(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex-encoded SHA-256 of the canonical form.
    ///
    /// Fixed-length and safe to use in logs and remote key names.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
