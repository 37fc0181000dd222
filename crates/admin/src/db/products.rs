//! Product CRUD operations.

use sqlx::PgPool;

use verdant_core::{CategoryId, Product, ProductId, Slug};

use super::{RepositoryError, map_constraint};

/// Fields written on create and update.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub category_id: Option<CategoryId>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub is_premium: bool,
    pub tags: Vec<String>,
}

const COLUMNS: &str = "id, name, slug, description, category_id, images, \
                       is_active, is_premium, tags, created_at, updated_at";

const SLUG_CONFLICT: &str = "A product with this slug already exists.";

/// List all products, newest first, inactive included.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Product>, RepositoryError> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Fetch one product by id.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn get(pool: &PgPool, id: ProductId) -> Result<Product, RepositoryError> {
    sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RepositoryError::NotFound)
}

/// Create a product.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` on a duplicate slug and
/// `RepositoryError::InvalidReference` on an unknown category.
pub async fn create(pool: &PgPool, input: &ProductInput) -> Result<Product, RepositoryError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        r"
        INSERT INTO products (name, slug, description, category_id, images,
                              is_active, is_premium, tags)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {COLUMNS}
        "
    ))
    .bind(&input.name)
    .bind(&input.slug)
    .bind(&input.description)
    .bind(input.category_id)
    .bind(&input.images)
    .bind(input.is_active)
    .bind(input.is_premium)
    .bind(&input.tags)
    .fetch_one(pool)
    .await
    .map_err(|e| map_constraint(e, SLUG_CONFLICT))?;

    Ok(product)
}

/// Update a product in full.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist, and the
/// same constraint mapping as [`create`].
pub async fn update(
    pool: &PgPool,
    id: ProductId,
    input: &ProductInput,
) -> Result<Product, RepositoryError> {
    sqlx::query_as::<_, Product>(&format!(
        r"
        UPDATE products
        SET name = $2, slug = $3, description = $4, category_id = $5,
            images = $6, is_active = $7, is_premium = $8, tags = $9,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {COLUMNS}
        "
    ))
    .bind(id)
    .bind(&input.name)
    .bind(&input.slug)
    .bind(&input.description)
    .bind(input.category_id)
    .bind(&input.images)
    .bind(input.is_active)
    .bind(input.is_premium)
    .bind(&input.tags)
    .fetch_optional(pool)
    .await
    .map_err(|e| map_constraint(e, SLUG_CONFLICT))?
    .ok_or(RepositoryError::NotFound)
}

/// Delete a product.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn delete(pool: &PgPool, id: ProductId) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
