//! Assembly of flat category rows into a forest.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::entities::Category;

/// A category with its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryTree>,
}

impl CategoryTree {
    /// Ids of this category and every descendant, depth first.
    pub fn descendant_ids(&self) -> Vec<i64> {
        let mut ids = vec![self.category.id];
        for child in &self.children {
            ids.extend(child.descendant_ids());
        }
        ids
    }
}

/// Builds the category forest from rows in any order.
///
/// Roots are the rows without a parent. Children keep the relative order in
/// which they appear in `rows`, so callers that want name-ordered siblings
/// pass name-ordered rows. Rows whose parent is absent from the input are
/// dropped together with their descendants; they are never promoted to
/// roots. The hierarchy is assumed acyclic.
pub fn build_forest(rows: Vec<Category>) -> Vec<CategoryTree> {
    let mut children_of: HashMap<i64, Vec<Category>> = HashMap::new();
    let mut roots = Vec::new();

    for row in rows {
        match row.parent_id {
            Some(parent_id) => children_of.entry(parent_id).or_default().push(row),
            None => roots.push(row),
        }
    }

    roots
        .into_iter()
        .map(|root| attach_children(root, &mut children_of))
        .collect()
}

fn attach_children(
    category: Category,
    children_of: &mut HashMap<i64, Vec<Category>>,
) -> CategoryTree {
    let children = children_of
        .remove(&category.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach_children(child, children_of))
        .collect();

    CategoryTree { category, children }
}
