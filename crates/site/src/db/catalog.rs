//! Read-only catalog and content queries.

use sqlx::PgPool;

use verdant_core::{Category, Page, Product, Slider, Widget};

use super::RepositoryError;

/// List active products, newest first.
///
/// `category_slug` restricts to one category; `premium` filters on the
/// premium flag. Both are optional and combine.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_active_products(
    pool: &PgPool,
    category_slug: Option<&str>,
    premium: Option<bool>,
) -> Result<Vec<Product>, RepositoryError> {
    let products = sqlx::query_as::<_, Product>(
        r"
        SELECT id, name, slug, description, category_id, images,
               is_active, is_premium, tags, created_at, updated_at
        FROM products
        WHERE is_active
          AND ($1::text IS NULL OR category_id IN (SELECT id FROM categories WHERE slug = $1))
          AND ($2::bool IS NULL OR is_premium = $2)
        ORDER BY created_at DESC
        ",
    )
    .bind(category_slug)
    .bind(premium)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Fetch one active product by slug.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no active product has the slug.
pub async fn get_active_product(pool: &PgPool, slug: &str) -> Result<Product, RepositoryError> {
    sqlx::query_as::<_, Product>(
        r"
        SELECT id, name, slug, description, category_id, images,
               is_active, is_premium, tags, created_at, updated_at
        FROM products
        WHERE is_active AND slug = $1
        ",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?
    .ok_or(RepositoryError::NotFound)
}

/// List active categories ordered by sort order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_active_categories(pool: &PgPool) -> Result<Vec<Category>, RepositoryError> {
    let categories = sqlx::query_as::<_, Category>(
        r"
        SELECT id, name, slug, parent_id, sort_order, is_active, created_at, updated_at
        FROM categories
        WHERE is_active
        ORDER BY sort_order, name
        ",
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Fetch one active page by slug.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no active page has the slug.
pub async fn get_active_page(pool: &PgPool, slug: &str) -> Result<Page, RepositoryError> {
    sqlx::query_as::<_, Page>(
        r"
        SELECT id, title, slug, content, template, is_active, created_at, updated_at
        FROM pages
        WHERE is_active AND slug = $1
        ",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?
    .ok_or(RepositoryError::NotFound)
}

/// List active widgets ordered by position.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_active_widgets(pool: &PgPool) -> Result<Vec<Widget>, RepositoryError> {
    let widgets = sqlx::query_as::<_, Widget>(
        r"
        SELECT id, kind, title, settings, position, is_active, created_at, updated_at
        FROM widgets
        WHERE is_active
        ORDER BY position, id
        ",
    )
    .fetch_all(pool)
    .await?;

    Ok(widgets)
}

/// List active sliders ordered by position.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_active_sliders(pool: &PgPool) -> Result<Vec<Slider>, RepositoryError> {
    let sliders = sqlx::query_as::<_, Slider>(
        r"
        SELECT id, title, slides, position, is_active, created_at, updated_at
        FROM sliders
        WHERE is_active
        ORDER BY position, id
        ",
    )
    .fetch_all(pool)
    .await?;

    Ok(sliders)
}
