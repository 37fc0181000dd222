//! Authentication route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::admin_users;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::middleware::auth::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login with email and password.
///
/// POST /auth/login
///
/// The email must belong to an active row in the allow-list and the
/// password must verify. On success the admin is stored in the session.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<CurrentAdmin>> {
    let user = AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await?;

    // Rotate the session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session cycle: {e}")))?;

    let admin = CurrentAdmin::from(user);
    set_current_admin(&session, &admin)
        .await
        .map_err(|e| AppError::Internal(format!("session write: {e}")))?;

    // Last-login stamp is informational only
    if let Err(e) = admin_users::record_login(state.pool(), admin.id).await {
        tracing::warn!(error = %e, "Failed to stamp last login");
    }

    tracing::info!(email = %admin.email, role = %admin.role, "Admin logged in");

    Ok(Json(admin))
}

/// Logout the current admin.
///
/// POST /auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<super::ApiSuccess>> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session clear: {e}")))?;

    Ok(Json(super::ApiSuccess::ok()))
}

/// Return the logged-in admin.
///
/// GET /auth/me
pub async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}
