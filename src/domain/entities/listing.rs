//! Listing request and result types.
//!
//! A [`ProductFilter`] is the validated form of a listing request: every value
//! in it has already been trimmed, parsed and clamped, so the query compiler
//! can trust it. A [`ProductPage`] is what a listing request produces and what
//! the result cache stores.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::product::{ListingRow, Product};

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Sort order of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Ascending price.
    Cheap,
    /// Descending price.
    Expensive,
    /// Most recently created first.
    #[default]
    New,
    /// Ascending name.
    Alphabetical,
}

impl SortMode {
    /// Parses a sort parameter. Unknown or missing values fall back to
    /// [`SortMode::New`].
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("cheap") => Self::Cheap,
            Some("expensive") => Self::Expensive,
            Some("alphabetical") => Self::Alphabetical,
            _ => Self::New,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cheap => "cheap",
            Self::Expensive => "expensive",
            Self::New => "new",
            Self::Alphabetical => "alphabetical",
        }
    }
}

/// A 1-based page number and a page size, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Creates a page request, raising zero values to 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Validated filter, sort and pagination for a product listing.
///
/// Empty id sets and `None` values mean "no filter". The boolean flags only
/// restrict the listing when `true`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub brand: Option<String>,
    pub max_price: Option<f64>,
    pub category_ids: BTreeSet<i64>,
    pub subcategory_ids: BTreeSet<i64>,
    pub search: Option<String>,
    pub on_offer: bool,
    pub featured: bool,
    pub sort: SortMode,
    pub pagination: PageRequest,
}

impl ProductFilter {
    pub fn new(pagination: PageRequest) -> Self {
        Self {
            pagination,
            ..Self::default()
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn with_categories(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.category_ids.extend(ids);
        self
    }

    pub fn with_subcategories(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.subcategory_ids.extend(ids);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn on_offer(mut self) -> Self {
        self.on_offer = true;
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn sorted_by(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}

/// Pagination metadata of a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Rows matching the filters across all pages.
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    /// `ceil(total / limit)`, 0 when `total` is 0.
    pub total_pages: u32,
}

impl PaginationInfo {
    pub fn new(total: i64, request: PageRequest) -> Self {
        let total = total.max(0);
        let limit = i64::from(request.page_size());
        let total_pages = (total + limit - 1) / limit;

        Self {
            total,
            page: request.page(),
            limit: request.page_size(),
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: PaginationInfo,
}

impl ProductPage {
    /// Assembles a page from listing rows.
    ///
    /// The total comes from the window count carried by the rows; an empty
    /// result set has a total of 0.
    pub fn from_rows(rows: Vec<ListingRow>, request: PageRequest) -> Self {
        let total = rows.first().map_or(0, |row| row.total_count);
        let products = rows.into_iter().map(|row| row.product).collect();

        Self {
            products,
            pagination: PaginationInfo::new(total, request),
        }
    }
}
