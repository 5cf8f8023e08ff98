//! Compiles listing requests into parametrized PostgreSQL queries.
//!
//! The compiler is a pure function of a validated [`ProductFilter`]. It emits
//! query text plus an ordered list of bound values whose positions match the
//! `$n` placeholders in the text.
//!
//! # Injection safety
//!
//! Every user-supplied value reaches the database as a bound parameter. The
//! only literal SQL written into the query text comes from fixed fragments in
//! this module: the `ORDER BY` clause picked from the [`SortMode`]
//! enumeration and the boolean flag predicates, which are never derived from
//! user strings. New filters must bind their values through
//! `PredicateWriter::bind`.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::entities::{ProductFilter, SortMode};

/// A value bound to a query placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Text(String),
    Float(f64),
    BigInt(i64),
    Timestamp(DateTime<Utc>),
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

/// Query text and its bound values, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<BoundValue>,
}

/// Columns shared by every product read, with category names left-joined.
macro_rules! product_select {
    () => {
        "SELECT p.id, p.name, p.description, p.brand, p.price::float8 AS price, \
         p.image_url, p.category_id, p.subcategory_id, p.is_offer, p.is_featured, p.created_at, \
         p.advertising_start, p.advertising_end, \
         c1.name AS subcategory_name, c2.name AS main_category_name"
    };
}

macro_rules! product_joins {
    () => {
        "FROM products p \
         LEFT JOIN categories c1 ON p.subcategory_id = c1.id \
         LEFT JOIN categories c2 ON p.category_id = c2.id"
    };
}

const PRODUCT_SELECT: &str = product_select!();
const PRODUCT_JOINS: &str = product_joins!();

/// Fetches one product by primary key. Binds `$1` to the product id.
pub const PRODUCT_BY_ID_SQL: &str =
    concat!(product_select!(), " ", product_joins!(), " WHERE p.id = $1");

/// Fetches the gallery of a product: its main image first, then the
/// additional images in insertion order. Binds `$1` to the product id.
pub const PRODUCT_GALLERY_SQL: &str = concat!(
    "SELECT url, is_main FROM (",
    "SELECT image_url AS url, true AS is_main, 0 AS priority, 0::bigint AS seq ",
    "FROM products WHERE id = $1 AND image_url IS NOT NULL ",
    "UNION ALL ",
    "SELECT url, false AS is_main, 1 AS priority, id AS seq ",
    "FROM products_img WHERE product_id = $1",
    ") gallery ORDER BY priority ASC, seq ASC"
);

/// Maximum number of rows returned by the offers and featured highlights.
pub const HIGHLIGHT_LIMIT: i64 = 10;

/// Accumulates predicates and allocates placeholders for their values.
struct PredicateWriter {
    predicates: Vec<String>,
    params: Vec<BoundValue>,
}

impl PredicateWriter {
    fn new() -> Self {
        Self {
            predicates: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Binds a value and returns its placeholder.
    fn bind(&mut self, value: BoundValue) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    /// Binds each id and returns the comma-separated placeholder list.
    fn bind_ids<'a>(&mut self, ids: impl IntoIterator<Item = &'a i64>) -> String {
        ids.into_iter()
            .map(|id| self.bind(BoundValue::BigInt(*id)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn push(&mut self, predicate: String) {
        self.predicates.push(predicate);
    }

    fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicates.join(" AND "))
        }
    }
}

/// Compiles a listing request into a single query returning one page of
/// products, each row carrying the total match count as `total_count`.
pub fn compile_listing(filter: &ProductFilter) -> CompiledQuery {
    let mut writer = PredicateWriter::new();

    if let Some(brand) = filter.brand.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        let placeholder = writer.bind(BoundValue::Text(escape_like(brand)));
        writer.push(format!("p.brand ILIKE {placeholder}"));
    }

    if let Some(max_price) = filter.max_price {
        let placeholder = writer.bind(BoundValue::Float(max_price));
        writer.push(format!("p.price <= {placeholder}"));
    }

    push_category_predicate(&mut writer, filter);

    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let placeholder = writer.bind(BoundValue::Text(format!("%{}%", escape_like(term))));
        writer.push(format!(
            "(p.name ILIKE {placeholder} OR p.description ILIKE {placeholder} OR p.brand ILIKE {placeholder})"
        ));
    }

    if filter.on_offer {
        writer.push("p.is_offer = true".to_string());
    }
    if filter.featured {
        writer.push("p.is_featured = true".to_string());
    }

    let where_clause = writer.where_clause();
    let limit = writer.bind(BoundValue::BigInt(i64::from(filter.pagination.page_size())));
    let offset = writer.bind(BoundValue::BigInt(filter.pagination.offset()));

    let sql = format!(
        "{PRODUCT_SELECT}, COUNT(*) OVER() AS total_count {PRODUCT_JOINS}{where_clause} {} LIMIT {limit} OFFSET {offset}",
        order_by(filter.sort)
    );

    CompiledQuery {
        sql,
        params: writer.params,
    }
}

/// Category and subcategory selections are alternatives: a product matching
/// either one is listed.
fn push_category_predicate(writer: &mut PredicateWriter, filter: &ProductFilter) {
    let mut alternatives = Vec::new();

    if !filter.category_ids.is_empty() {
        let placeholders = writer.bind_ids(&filter.category_ids);
        alternatives.push(format!("p.category_id IN ({placeholders})"));
    }

    if !filter.subcategory_ids.is_empty() {
        let placeholders = writer.bind_ids(&filter.subcategory_ids);
        alternatives.push(format!(
            "(p.subcategory_id IN ({placeholders}) OR p.subcategory_id IN \
             (SELECT id FROM categories WHERE parent_id IN ({placeholders})))"
        ));
    }

    if !alternatives.is_empty() {
        writer.push(format!("({})", alternatives.join(" OR ")));
    }
}

fn order_by(sort: SortMode) -> &'static str {
    match sort {
        SortMode::Cheap => "ORDER BY p.price ASC, p.id ASC",
        SortMode::Expensive => "ORDER BY p.price DESC, p.id ASC",
        SortMode::New => "ORDER BY p.created_at DESC, p.id DESC",
        SortMode::Alphabetical => "ORDER BY p.name ASC, p.id ASC",
    }
}

/// Escapes `ILIKE` wildcards so user text matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Products flagged as on offer, capped at [`HIGHLIGHT_LIMIT`].
pub fn compile_offers() -> CompiledQuery {
    highlight("p.is_offer = true")
}

/// Products flagged as featured, capped at [`HIGHLIGHT_LIMIT`].
pub fn compile_featured() -> CompiledQuery {
    highlight("p.is_featured = true")
}

fn highlight(predicate: &str) -> CompiledQuery {
    CompiledQuery {
        sql: format!(
            "{PRODUCT_SELECT} {PRODUCT_JOINS} WHERE {predicate} ORDER BY p.created_at DESC, p.id DESC LIMIT $1"
        ),
        params: vec![BoundValue::BigInt(HIGHLIGHT_LIMIT)],
    }
}

/// Products whose advertising window contains `$1`, newest first.
pub fn compile_advertised(now: DateTime<Utc>) -> CompiledQuery {
    CompiledQuery {
        sql: format!(
            "{PRODUCT_SELECT} {PRODUCT_JOINS} \
             WHERE p.advertising_start <= $1 AND p.advertising_end >= $1 \
             ORDER BY p.created_at DESC, p.id DESC"
        ),
        params: vec![BoundValue::Timestamp(now)],
    }
}
