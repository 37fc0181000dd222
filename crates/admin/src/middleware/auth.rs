//! Authentication extractors for the back-office.
//!
//! The back-office is a JSON API; unauthenticated requests get 401 rather
//! than a redirect, and the frontend routes to its login screen.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::error::ApiFailure;
use crate::models::{CurrentAdmin, session_keys};

/// Extractor that requires an authenticated admin of any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but missing.
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(ApiFailure::new("Please sign in.")),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_admin(parts).await.map(Self).ok_or(AdminAuthRejection)
    }
}

/// Extractor that requires an admin whose role can mutate content.
///
/// Viewers pass `RequireAdminAuth` but are rejected here with 403.
pub struct RequireEditor(pub CurrentAdmin);

/// Error returned when editor rights are required.
pub enum EditorRejection {
    /// Not logged in at all.
    Unauthorized,
    /// Logged in, but the role is read-only.
    ReadOnly,
}

impl IntoResponse for EditorRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => AdminAuthRejection.into_response(),
            Self::ReadOnly => (
                StatusCode::FORBIDDEN,
                axum::Json(ApiFailure::new("Your account has read-only access.")),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireEditor
where
    S: Send + Sync,
{
    type Rejection = EditorRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = current_admin(parts)
            .await
            .ok_or(EditorRejection::Unauthorized)?;

        if !admin.role.can_edit() {
            return Err(EditorRejection::ReadOnly);
        }

        Ok(Self(admin))
    }
}

/// Read the current admin out of the request's session, if any.
async fn current_admin(parts: &mut Parts) -> Option<CurrentAdmin> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}
