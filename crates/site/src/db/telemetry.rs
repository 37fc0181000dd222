//! Fire-and-forget engagement writes.
//!
//! Everything here is best-effort by contract: callers spawn these off the
//! request path, failures are logged at `warn` and never affect the
//! response that triggered them.

use sqlx::PgPool;
use uuid::Uuid;

use verdant_core::Email;

use super::RepositoryError;

/// Record one advisory exchange against a chat session, creating the
/// session row on first use.
///
/// # Errors
///
/// Returns an error if the database upsert fails.
pub async fn record_chat_exchange(pool: &PgPool, session_id: Uuid) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO chat_sessions (id, started_at, message_count, last_message_at)
        VALUES ($1, NOW(), 1, NOW())
        ON CONFLICT (id) DO UPDATE
        SET message_count = chat_sessions.message_count + 1,
            last_message_at = NOW()
        ",
    )
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Bump a daily analytics counter.
///
/// # Errors
///
/// Returns an error if the database upsert fails.
pub async fn bump_counter(pool: &PgPool, key: &str) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO analytics_counters (key, day, count)
        VALUES ($1, CURRENT_DATE, 1)
        ON CONFLICT (key, day) DO UPDATE
        SET count = analytics_counters.count + 1
        ",
    )
    .bind(key)
    .execute(pool)
    .await?;

    Ok(())
}

/// Subscribe an email to the newsletter.
///
/// Returns `true` when this created a new subscription and `false` when the
/// address was already subscribed (re-subscribing clears a prior
/// unsubscribe either way).
///
/// # Errors
///
/// Returns an error if the database upsert fails.
pub async fn subscribe(pool: &PgPool, email: &Email) -> Result<bool, RepositoryError> {
    let inserted = sqlx::query_scalar::<_, bool>(
        r"
        INSERT INTO newsletter_subscribers (email, subscribed_at)
        VALUES ($1, NOW())
        ON CONFLICT (email) DO UPDATE
        SET unsubscribed_at = NULL
        RETURNING (xmax = 0)
        ",
    )
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(inserted)
}

/// Spawn a best-effort telemetry task off the request path.
///
/// The future's failure is logged and swallowed; the caller never waits.
pub fn spawn_best_effort<F>(what: &'static str, fut: F)
where
    F: std::future::Future<Output = Result<(), RepositoryError>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = fut.await {
            tracing::warn!(error = %e, "{what} logging failed");
        }
    });
}
