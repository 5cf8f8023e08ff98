//! Core domain entities representing the catalog data model.
//!
//! Entities are plain data structures. Products and categories mirror storage
//! rows; listing types describe a validated listing request and its result.
//!
//! # Entity Types
//!
//! - [`Product`] - A catalog product, enriched with its category names
//! - [`Category`] - A node of the category hierarchy
//! - [`ProductFilter`] - A validated listing request
//! - [`ProductPage`] - One page of listing results with pagination metadata

pub mod category;
pub mod listing;
pub mod product;

pub use category::Category;
pub use listing::{
    DEFAULT_PAGE_SIZE, PageRequest, PaginationInfo, ProductFilter, ProductPage, SortMode,
};
pub use product::{ListingRow, Product, ProductDetail, ProductImage};
