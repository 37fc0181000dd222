//! Read-only views over the engagement tables the site writes.

use sqlx::PgPool;

use verdant_core::{ChatSession, Subscriber};

use super::RepositoryError;

/// List newsletter subscribers, newest first. Unsubscribed rows are kept
/// (with their timestamp) so exports can honor suppression.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_subscribers(pool: &PgPool) -> Result<Vec<Subscriber>, RepositoryError> {
    let subscribers = sqlx::query_as::<_, Subscriber>(
        r"
        SELECT id, email, subscribed_at, unsubscribed_at
        FROM newsletter_subscribers
        ORDER BY subscribed_at DESC
        ",
    )
    .fetch_all(pool)
    .await?;

    Ok(subscribers)
}

/// List recent advisory chat sessions, most recently active first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_chat_sessions(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<ChatSession>, RepositoryError> {
    let sessions = sqlx::query_as::<_, ChatSession>(
        r"
        SELECT id, started_at, message_count, last_message_at
        FROM chat_sessions
        ORDER BY last_message_at DESC
        LIMIT $1
        ",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}
