//! Category CRUD operations.

use sqlx::PgPool;

use verdant_core::{Category, CategoryId, Slug};

use super::{RepositoryError, map_constraint};

/// Fields written on create and update.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub slug: Slug,
    pub parent_id: Option<CategoryId>,
    pub sort_order: i32,
    pub is_active: bool,
}

const COLUMNS: &str = "id, name, slug, parent_id, sort_order, is_active, created_at, updated_at";

const SLUG_CONFLICT: &str = "A category with this slug already exists.";

/// List all categories, inactive included.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Category>, RepositoryError> {
    let categories = sqlx::query_as::<_, Category>(&format!(
        "SELECT {COLUMNS} FROM categories ORDER BY sort_order, name"
    ))
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Fetch one category by id.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn get(pool: &PgPool, id: CategoryId) -> Result<Category, RepositoryError> {
    sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM categories WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RepositoryError::NotFound)
}

/// Create a category.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` on a duplicate slug and
/// `RepositoryError::InvalidReference` on an unknown parent.
pub async fn create(pool: &PgPool, input: &CategoryInput) -> Result<Category, RepositoryError> {
    let category = sqlx::query_as::<_, Category>(&format!(
        r"
        INSERT INTO categories (name, slug, parent_id, sort_order, is_active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLUMNS}
        "
    ))
    .bind(&input.name)
    .bind(&input.slug)
    .bind(input.parent_id)
    .bind(input.sort_order)
    .bind(input.is_active)
    .fetch_one(pool)
    .await
    .map_err(|e| map_constraint(e, SLUG_CONFLICT))?;

    Ok(category)
}

/// Update a category in full.
///
/// Self-parenting is rejected before touching the database.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist,
/// `RepositoryError::InvalidReference` for a self or unknown parent, and
/// `RepositoryError::Conflict` on a duplicate slug.
pub async fn update(
    pool: &PgPool,
    id: CategoryId,
    input: &CategoryInput,
) -> Result<Category, RepositoryError> {
    if input.parent_id == Some(id) {
        return Err(RepositoryError::InvalidReference(
            "a category cannot be its own parent".to_string(),
        ));
    }

    sqlx::query_as::<_, Category>(&format!(
        r"
        UPDATE categories
        SET name = $2, slug = $3, parent_id = $4, sort_order = $5,
            is_active = $6, updated_at = NOW()
        WHERE id = $1
        RETURNING {COLUMNS}
        "
    ))
    .bind(id)
    .bind(&input.name)
    .bind(&input.slug)
    .bind(input.parent_id)
    .bind(input.sort_order)
    .bind(input.is_active)
    .fetch_optional(pool)
    .await
    .map_err(|e| map_constraint(e, SLUG_CONFLICT))?
    .ok_or(RepositoryError::NotFound)
}

/// Delete a category, re-parenting its children to the deleted node's
/// parent so no subtree is orphaned.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn delete(pool: &PgPool, id: CategoryId) -> Result<(), RepositoryError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r"
        UPDATE categories
        SET parent_id = (SELECT parent_id FROM categories WHERE id = $1)
        WHERE parent_id = $1
        ",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        // Nothing deleted; the re-parent above was a no-op too
        tx.rollback().await?;
        return Err(RepositoryError::NotFound);
    }

    tx.commit().await?;
    Ok(())
}
