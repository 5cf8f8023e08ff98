//! Data Transfer Objects for API requests and responses.
//!
//! Query strings are parsed leniently with `serde_with`; response field names
//! follow the public JSON contract of the catalog.

pub mod admin;
pub mod health;
pub mod listing;
pub mod product;
