//! Media records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MediaId, MediaKind};

/// A stored media blob.
///
/// One row per blob: `filename` is the name the admin uploaded, `stored_name`
/// the collision-free name on disk, `url` the public path the blob is served
/// under. Deleting the row is authoritative; removing the blob itself is
/// best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Media {
    pub id: MediaId,
    pub filename: String,
    pub stored_name: String,
    pub url: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}
