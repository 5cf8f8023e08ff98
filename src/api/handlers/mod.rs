//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod categories;
pub mod health;
pub mod highlights;
pub mod listing;
pub mod product;

pub use admin::clear_cache_handler;
pub use categories::categories_handler;
pub use health::health_handler;
pub use highlights::{advertising_handler, featured_handler, offers_handler};
pub use listing::listing_handler;
pub use product::product_handler;
