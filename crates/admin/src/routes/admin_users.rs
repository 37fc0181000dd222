//! Admin-user management route handlers (super admin only).

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use verdant_core::{AdminRole, AdminUser, Email};

use crate::db::{activity, admin_users};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::CurrentAdmin;
use crate::services::auth;
use crate::state::AppState;

/// Reject any caller who is not a super admin.
fn ensure_super_admin(admin: &CurrentAdmin) -> Result<()> {
    if admin.role == AdminRole::SuperAdmin {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only super admins can manage admin accounts.".to_string(),
        ))
    }
}

/// List admin users, deactivated ones included.
///
/// GET /admins
#[instrument(skip(state, admin))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Result<Json<Vec<AdminUser>>> {
    ensure_super_admin(&admin)?;
    Ok(Json(admin_users::list(state.pool()).await?))
}

/// Payload for creating an admin user.
#[derive(Debug, Deserialize)]
pub struct CreateAdminPayload {
    pub email: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: AdminRole,
    pub password: String,
}

const fn default_role() -> AdminRole {
    AdminRole::Admin
}

/// Create an admin user.
///
/// POST /admins
#[instrument(skip(state, admin, payload), fields(email = %payload.email))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Json(payload): Json<CreateAdminPayload>,
) -> Result<Json<AdminUser>> {
    ensure_super_admin(&admin)?;

    let email = Email::parse(&payload.email)
        .map_err(|e| AppError::BadRequest(format!("Invalid email: {e}")))?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required.".to_string()));
    }

    let password_hash =
        auth::hash_password(&payload.password).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = admin_users::create(state.pool(), &email, name, payload.role, &password_hash).await?;

    activity::log(
        state.pool(),
        &admin,
        "create",
        "admin_user",
        Some(user.id.as_i32()),
        json!({ "email": user.email, "role": user.role }),
    );

    Ok(Json(user))
}

/// Payload for deactivating an admin user.
#[derive(Debug, Deserialize)]
pub struct DeactivatePayload {
    pub email: String,
}

/// Deactivate an admin user by email.
///
/// POST /admins/deactivate
#[instrument(skip(state, admin), fields(email = %payload.email))]
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Json(payload): Json<DeactivatePayload>,
) -> Result<Json<super::ApiSuccess>> {
    ensure_super_admin(&admin)?;

    let email = Email::parse(&payload.email)
        .map_err(|e| AppError::BadRequest(format!("Invalid email: {e}")))?;

    if email == admin.email {
        return Err(AppError::BadRequest(
            "You cannot deactivate your own account.".to_string(),
        ));
    }

    admin_users::set_active(state.pool(), &email, false)
        .await
        .map_err(|e| super::named_not_found(e, "admin account"))?;

    activity::log(
        state.pool(),
        &admin,
        "deactivate",
        "admin_user",
        None,
        json!({ "email": email }),
    );

    Ok(Json(super::ApiSuccess::ok()))
}
