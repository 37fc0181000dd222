//! Activity-log route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use verdant_core::AdminActivity;

use crate::db::activity;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Paging parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    #[serde(default)]
    pub page: i64,
}

/// List activity entries, newest first.
///
/// GET /activity?page=N
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<AdminActivity>>> {
    Ok(Json(activity::list(state.pool(), query.page).await?))
}
