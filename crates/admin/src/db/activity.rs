//! Activity-log operations and dashboard counts.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use verdant_core::AdminActivity;

use crate::models::CurrentAdmin;

use super::RepositoryError;

/// Entries per activity-log page.
pub const PAGE_SIZE: i64 = 50;

/// Insert one activity entry.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub async fn insert(
    pool: &PgPool,
    admin: &CurrentAdmin,
    action: &str,
    entity_kind: &str,
    entity_id: Option<i32>,
    detail: JsonValue,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO admin_activities (admin_user_id, admin_email, action, entity_kind, entity_id, detail)
        VALUES ($1, $2, $3, $4, $5, $6)
        ",
    )
    .bind(admin.id)
    .bind(admin.email.as_str())
    .bind(action)
    .bind(entity_kind)
    .bind(entity_id)
    .bind(detail)
    .execute(pool)
    .await?;

    Ok(())
}

/// Log a successful mutation, fire-and-forget.
///
/// Spawned off the request path: a failed write is logged at `warn` and
/// never affects the mutation that triggered it.
pub fn log(
    pool: &PgPool,
    admin: &CurrentAdmin,
    action: &'static str,
    entity_kind: &'static str,
    entity_id: Option<i32>,
    detail: JsonValue,
) {
    let pool = pool.clone();
    let admin = admin.clone();
    tokio::spawn(async move {
        if let Err(e) = insert(&pool, &admin, action, entity_kind, entity_id, detail).await {
            tracing::warn!(error = %e, action, entity_kind, "Activity logging failed");
        }
    });
}

/// List activity entries, newest first, paged.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(pool: &PgPool, page: i64) -> Result<Vec<AdminActivity>, RepositoryError> {
    let offset = page.max(0) * PAGE_SIZE;

    let entries = sqlx::query_as::<_, AdminActivity>(
        r"
        SELECT id, admin_user_id, admin_email, action, entity_kind, entity_id, detail, created_at
        FROM admin_activities
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        ",
    )
    .bind(PAGE_SIZE)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Entity counts shown on the dashboard.
#[derive(Debug, sqlx::FromRow, serde::Serialize)]
pub struct DashboardCounts {
    pub products: i64,
    pub categories: i64,
    pub pages: i64,
    pub widgets: i64,
    pub sliders: i64,
    pub media: i64,
}

/// Count every content collection in one round trip.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn dashboard_counts(pool: &PgPool) -> Result<DashboardCounts, RepositoryError> {
    let counts = sqlx::query_as::<_, DashboardCounts>(
        r"
        SELECT
            (SELECT COUNT(*) FROM products)   AS products,
            (SELECT COUNT(*) FROM categories) AS categories,
            (SELECT COUNT(*) FROM pages)      AS pages,
            (SELECT COUNT(*) FROM widgets)    AS widgets,
            (SELECT COUNT(*) FROM sliders)    AS sliders,
            (SELECT COUNT(*) FROM media)      AS media
        ",
    )
    .fetch_one(pool)
    .await?;

    Ok(counts)
}
