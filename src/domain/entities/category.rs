//! Category entity.

use serde::{Deserialize, Serialize};

/// A catalog category.
///
/// Categories form a self-referential hierarchy: a category without a parent
/// is a top-level category, otherwise it is a subcategory of `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>, parent_id: Option<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
        }
    }
}
