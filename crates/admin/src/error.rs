//! Unified error handling for the back-office.
//!
//! Every failure body is the uniform `{"success": false, "message"}` shape
//! the admin frontend surfaces as a toast; server-side failures are
//! captured to Sentry before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the admin binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Media storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Target record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique constraint (slug, email) was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Caller is not authenticated.
    #[error("Unauthorized")]
    Unauthorized,

    /// Caller is authenticated but lacks the role for this action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        // Repository-level conflicts and misses carry user-relevant messages;
        // everything else is an opaque database failure.
        match err {
            RepositoryError::NotFound => Self::NotFound("record".to_string()),
            RepositoryError::Conflict(message) => Self::Conflict(message),
            RepositoryError::InvalidReference(message) => Self::BadRequest(message),
            other => Self::Database(other),
        }
    }
}

/// The uniform JSON failure body.
#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub message: String,
}

impl ApiFailure {
    /// Build a failure body with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_)
                | Self::Internal(_)
                | Self::Storage(_)
                | Self::Auth(AuthError::Repository(_) | AuthError::Hash(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(err) => match err {
                AuthError::Repository(_) | AuthError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AuthError::WeakPassword(_) | AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            },
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match self {
            Self::Database(_) | Self::Internal(_) | Self::Storage(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            Self::Auth(err) => match err {
                AuthError::Repository(_) | AuthError::Hash(_) => {
                    "Something went wrong. Please try again.".to_string()
                }
                AuthError::WeakPassword(msg) => msg,
                AuthError::InvalidEmail(_) => "Invalid email address.".to_string(),
                AuthError::InvalidCredentials => "Invalid credentials.".to_string(),
            },
            Self::Unauthorized => "Invalid credentials.".to_string(),
            Self::NotFound(what) => format!("The requested {what} does not exist."),
            Self::Conflict(message) | Self::BadRequest(message) | Self::Forbidden(message) => {
                message
            }
        };

        (status, Json(ApiFailure::new(message))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::NotFound("page".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Conflict("slug taken".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Forbidden("read-only".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::BadRequest("bad".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_repository_error_mapping() {
        let err: AppError = RepositoryError::NotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = RepositoryError::Conflict("slug already in use".into()).into();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_not_found_message_names_entity() {
        let response = AppError::NotFound("product".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
