//! Widget CRUD operations.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use verdant_core::{Widget, WidgetId, WidgetKind};

use super::RepositoryError;

/// Fields written on create and update.
#[derive(Debug, Clone)]
pub struct WidgetInput {
    pub kind: WidgetKind,
    pub title: String,
    pub settings: JsonValue,
    pub position: i32,
    pub is_active: bool,
}

const COLUMNS: &str = "id, kind, title, settings, position, is_active, created_at, updated_at";

/// List all widgets, inactive included.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Widget>, RepositoryError> {
    let widgets = sqlx::query_as::<_, Widget>(&format!(
        "SELECT {COLUMNS} FROM widgets ORDER BY position, id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(widgets)
}

/// Fetch one widget by id.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn get(pool: &PgPool, id: WidgetId) -> Result<Widget, RepositoryError> {
    sqlx::query_as::<_, Widget>(&format!("SELECT {COLUMNS} FROM widgets WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RepositoryError::NotFound)
}

/// Create a widget.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub async fn create(pool: &PgPool, input: &WidgetInput) -> Result<Widget, RepositoryError> {
    let widget = sqlx::query_as::<_, Widget>(&format!(
        r"
        INSERT INTO widgets (kind, title, settings, position, is_active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLUMNS}
        "
    ))
    .bind(input.kind)
    .bind(&input.title)
    .bind(&input.settings)
    .bind(input.position)
    .bind(input.is_active)
    .fetch_one(pool)
    .await?;

    Ok(widget)
}

/// Update a widget in full.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn update(
    pool: &PgPool,
    id: WidgetId,
    input: &WidgetInput,
) -> Result<Widget, RepositoryError> {
    sqlx::query_as::<_, Widget>(&format!(
        r"
        UPDATE widgets
        SET kind = $2, title = $3, settings = $4, position = $5,
            is_active = $6, updated_at = NOW()
        WHERE id = $1
        RETURNING {COLUMNS}
        "
    ))
    .bind(id)
    .bind(input.kind)
    .bind(&input.title)
    .bind(&input.settings)
    .bind(input.position)
    .bind(input.is_active)
    .fetch_optional(pool)
    .await?
    .ok_or(RepositoryError::NotFound)
}

/// Delete a widget.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn delete(pool: &PgPool, id: WidgetId) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM widgets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
