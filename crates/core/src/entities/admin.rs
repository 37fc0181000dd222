//! Admin user and activity-log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::types::{ActivityId, AdminRole, AdminUserId, Email};

/// A back-office user.
///
/// The `admin_users` table is the allow-list: only an active row with a
/// verified password grants access. The password hash is deliberately not
/// part of this record; the auth service fetches it separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// One entry in the back-office activity log.
///
/// Written fire-and-forget after each successful mutation; a failed write
/// never affects the mutation's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct AdminActivity {
    pub id: ActivityId,
    pub admin_user_id: AdminUserId,
    pub admin_email: String,
    pub action: String,
    pub entity_kind: String,
    pub entity_id: Option<i32>,
    pub detail: JsonValue,
    pub created_at: DateTime<Utc>,
}
