//! Media row operations.
//!
//! Blobs themselves live in [`crate::storage`]; these rows are the
//! authoritative record of what exists.

use sqlx::PgPool;

use verdant_core::{Media, MediaId, MediaKind};

use super::RepositoryError;

/// Fields written when an upload lands.
#[derive(Debug, Clone)]
pub struct MediaInput {
    pub filename: String,
    pub stored_name: String,
    pub url: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub size_bytes: i64,
}

const COLUMNS: &str = "id, filename, stored_name, url, content_type, kind, size_bytes, created_at";

/// List all media rows, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Media>, RepositoryError> {
    let media = sqlx::query_as::<_, Media>(&format!(
        "SELECT {COLUMNS} FROM media ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(media)
}

/// Insert a media row for a stored blob.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub async fn create(pool: &PgPool, input: &MediaInput) -> Result<Media, RepositoryError> {
    let media = sqlx::query_as::<_, Media>(&format!(
        r"
        INSERT INTO media (filename, stored_name, url, content_type, kind, size_bytes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {COLUMNS}
        "
    ))
    .bind(&input.filename)
    .bind(&input.stored_name)
    .bind(&input.url)
    .bind(&input.content_type)
    .bind(input.kind)
    .bind(input.size_bytes)
    .fetch_one(pool)
    .await?;

    Ok(media)
}

/// Delete a media row, returning it so the caller can unlink the blob.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the id does not exist.
pub async fn delete(pool: &PgPool, id: MediaId) -> Result<Media, RepositoryError> {
    sqlx::query_as::<_, Media>(&format!(
        "DELETE FROM media WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(RepositoryError::NotFound)
}
