//! Product and category records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId, Slug};

/// A catalog product.
///
/// `slug` is unique across products (database constraint). `images` holds
/// public URLs into the media store; the first entry is the primary image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub category_id: Option<CategoryId>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub is_premium: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A catalog category.
///
/// Categories form a tree via `parent_id`. The admin layer rejects
/// self-parenting and unknown parents; deleting a category re-parents its
/// children to the deleted node's parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub parent_id: Option<CategoryId>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category with its direct children, as served by the public API.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

impl CategoryNode {
    /// Assemble root categories with their direct children.
    ///
    /// Input order is preserved within each level, so callers should pass
    /// rows already ordered by `sort_order`. Categories whose parent is
    /// missing from `categories` (e.g. an inactive parent) are lifted to the
    /// root level rather than dropped.
    #[must_use]
    pub fn build_tree(categories: Vec<Category>) -> Vec<Self> {
        let known: std::collections::HashSet<_> = categories.iter().map(|c| c.id).collect();

        let (parents, children): (Vec<_>, Vec<_>) = categories
            .into_iter()
            .partition(|c| c.parent_id.is_none_or(|p| !known.contains(&p)));

        parents
            .into_iter()
            .map(|category| {
                let children = children
                    .iter()
                    .filter(|c| c.parent_id == Some(category.id))
                    .cloned()
                    .collect();
                Self { category, children }
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn category(id: i32, parent: Option<i32>, sort: i32) -> Category {
        Category {
            id: CategoryId::new(id),
            name: format!("Category {id}"),
            slug: Slug::generate(&format!("category {id}"), &[]),
            parent_id: parent.map(CategoryId::new),
            sort_order: sort,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_tree_nests_children() {
        let tree = CategoryNode::build_tree(vec![
            category(1, None, 0),
            category(2, Some(1), 0),
            category(3, Some(1), 1),
            category(4, None, 1),
        ]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.first().unwrap().children.len(), 2);
        assert_eq!(tree.get(1).unwrap().children.len(), 0);
    }

    #[test]
    fn test_build_tree_orphans_become_roots() {
        // Parent 9 is not in the set (inactive) - child surfaces at root
        let tree = CategoryNode::build_tree(vec![category(2, Some(9), 0)]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_build_tree_preserves_order() {
        let tree = CategoryNode::build_tree(vec![
            category(5, None, 0),
            category(1, None, 1),
            category(3, None, 2),
        ]);
        let ids: Vec<i32> = tree.iter().map(|n| n.category.id.as_i32()).collect();
        assert_eq!(ids, vec![5, 1, 3]);
    }
}
