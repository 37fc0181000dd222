//! Newsletter and advisory-usage records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Email, SubscriberId};

/// A newsletter subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: Email,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

/// Usage log for one AI advisory conversation.
///
/// Rows are written fire-and-forget from the ai-chat endpoint; they carry no
/// message content, only volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct ChatSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub message_count: i32,
    pub last_message_at: DateTime<Utc>,
}
