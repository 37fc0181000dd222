//! Page CRUD operations.

use sqlx::PgPool;

use verdant_core::{Page, PageId, Slug};

use super::{RepositoryError, map_constraint};

/// Fields written on create and update.
#[derive(Debug, Clone)]
pub struct PageInput {
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub template: String,
    pub is_active: bool,
}

const COLUMNS: &str = "id, title, slug, content, template, is_active, created_at, updated_at";

const SLUG_CONFLICT: &str = "A page with this slug already exists.";

/// List all pages, inactive included.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Page>, RepositoryError> {
    let pages =
        sqlx::query_as::<_, Page>(&format!("SELECT {COLUMNS} FROM pages ORDER BY title"))
            .fetch_all(pool)
            .await?;

    Ok(pages)
}

/// Fetch one page by id.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn get(pool: &PgPool, id: PageId) -> Result<Page, RepositoryError> {
    sqlx::query_as::<_, Page>(&format!("SELECT {COLUMNS} FROM pages WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RepositoryError::NotFound)
}

/// Create a page.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` on a duplicate slug.
pub async fn create(pool: &PgPool, input: &PageInput) -> Result<Page, RepositoryError> {
    let page = sqlx::query_as::<_, Page>(&format!(
        r"
        INSERT INTO pages (title, slug, content, template, is_active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLUMNS}
        "
    ))
    .bind(&input.title)
    .bind(&input.slug)
    .bind(&input.content)
    .bind(&input.template)
    .bind(input.is_active)
    .fetch_one(pool)
    .await
    .map_err(|e| map_constraint(e, SLUG_CONFLICT))?;

    Ok(page)
}

/// Update a page in full.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist and
/// `RepositoryError::Conflict` on a duplicate slug.
pub async fn update(pool: &PgPool, id: PageId, input: &PageInput) -> Result<Page, RepositoryError> {
    sqlx::query_as::<_, Page>(&format!(
        r"
        UPDATE pages
        SET title = $2, slug = $3, content = $4, template = $5,
            is_active = $6, updated_at = NOW()
        WHERE id = $1
        RETURNING {COLUMNS}
        "
    ))
    .bind(id)
    .bind(&input.title)
    .bind(&input.slug)
    .bind(&input.content)
    .bind(&input.template)
    .bind(input.is_active)
    .fetch_optional(pool)
    .await
    .map_err(|e| map_constraint(e, SLUG_CONFLICT))?
    .ok_or(RepositoryError::NotFound)
}

/// Delete a page.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn delete(pool: &PgPool, id: PageId) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM pages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
