//! Slider CRUD operations.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use verdant_core::{Slider, SliderId};

use super::RepositoryError;

/// Fields written on create and update.
#[derive(Debug, Clone)]
pub struct SliderInput {
    pub title: String,
    pub slides: JsonValue,
    pub position: i32,
    pub is_active: bool,
}

const COLUMNS: &str = "id, title, slides, position, is_active, created_at, updated_at";

/// List all sliders, inactive included.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Slider>, RepositoryError> {
    let sliders = sqlx::query_as::<_, Slider>(&format!(
        "SELECT {COLUMNS} FROM sliders ORDER BY position, id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(sliders)
}

/// Fetch one slider by id.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn get(pool: &PgPool, id: SliderId) -> Result<Slider, RepositoryError> {
    sqlx::query_as::<_, Slider>(&format!("SELECT {COLUMNS} FROM sliders WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(RepositoryError::NotFound)
}

/// Create a slider.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub async fn create(pool: &PgPool, input: &SliderInput) -> Result<Slider, RepositoryError> {
    let slider = sqlx::query_as::<_, Slider>(&format!(
        r"
        INSERT INTO sliders (title, slides, position, is_active)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "
    ))
    .bind(&input.title)
    .bind(&input.slides)
    .bind(input.position)
    .bind(input.is_active)
    .fetch_one(pool)
    .await?;

    Ok(slider)
}

/// Update a slider in full.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn update(
    pool: &PgPool,
    id: SliderId,
    input: &SliderInput,
) -> Result<Slider, RepositoryError> {
    sqlx::query_as::<_, Slider>(&format!(
        r"
        UPDATE sliders
        SET title = $2, slides = $3, position = $4, is_active = $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {COLUMNS}
        "
    ))
    .bind(id)
    .bind(&input.title)
    .bind(&input.slides)
    .bind(input.position)
    .bind(input.is_active)
    .fetch_optional(pool)
    .await?
    .ok_or(RepositoryError::NotFound)
}

/// Delete a slider.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn delete(pool: &PgPool, id: SliderId) -> Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM sliders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
