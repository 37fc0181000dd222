//! Dashboard route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use verdant_core::AdminActivity;

use crate::db::activity::{self, DashboardCounts};
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Dashboard payload: entity counts plus the most recent activity.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub counts: DashboardCounts,
    pub recent_activity: Vec<AdminActivity>,
}

/// Show the dashboard.
///
/// GET /dashboard
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Dashboard>> {
    let counts = activity::dashboard_counts(state.pool()).await?;
    let recent_activity = activity::list(state.pool(), 0).await?;

    Ok(Json(Dashboard {
        counts,
        recent_activity,
    }))
}
