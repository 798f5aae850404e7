//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Propagation policy: validation and conflict errors are safe to surface
//! verbatim; storage and data-integrity errors are logged here and replaced
//! with an opaque message before they reach a client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

use crate::domain::value_object::username::UsernameError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username violates the naming policy
    #[error("Invalid username: {0}")]
    UsernameValidation(#[from] UsernameError),

    /// Password violates the length policy
    #[error("Invalid password: {0}")]
    PasswordValidation(#[from] PasswordPolicyError),

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// An account with that username already exists
    #[error("An account with that username already exists")]
    DuplicateAccount,

    /// Account not found
    #[error("Account not found")]
    AccountNotFound,

    /// Invalid credentials (unknown username or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session cookie missing, malformed, or no longer backed by a record
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Terminate was asked to remove a session that is not stored
    #[error("Session not found")]
    SessionNotFound,

    /// A freshly generated session id already names a stored record.
    /// Not retried here; callers may retry the whole issuance.
    #[error("Session id collision")]
    SessionIdCollision,

    /// A stored session references an account that no longer exists
    #[error("Session refers to an account that no longer exists")]
    OrphanedSession,

    /// A cookie was presented under a name other than the session cookie name
    #[error("Unexpected cookie name: {0}")]
    WrongCookieName(String),

    /// Underlying store could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A stored record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UsernameValidation(_)
            | AuthError::PasswordValidation(_)
            | AuthError::PasswordMismatch => StatusCode::BAD_REQUEST,
            AuthError::DuplicateAccount => StatusCode::CONFLICT,
            AuthError::AccountNotFound | AuthError::SessionNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::WrongCookieName(_) => StatusCode::UNAUTHORIZED,
            AuthError::SessionIdCollision
            | AuthError::OrphanedSession
            | AuthError::Storage(_)
            | AuthError::Serialization(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UsernameValidation(_)
            | AuthError::PasswordValidation(_)
            | AuthError::PasswordMismatch => ErrorKind::BadRequest,
            AuthError::DuplicateAccount => ErrorKind::Conflict,
            AuthError::AccountNotFound | AuthError::SessionNotFound => ErrorKind::NotFound,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::WrongCookieName(_) => ErrorKind::Unauthorized,
            AuthError::SessionIdCollision
            | AuthError::OrphanedSession
            | AuthError::Storage(_)
            | AuthError::Serialization(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side faults are replaced with an opaque message; the detail
    /// stays in the logs.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            AppError::new(kind, "Internal server error")
        } else {
            AppError::new(kind, self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Auth storage error");
            }
            AuthError::Serialization(e) => {
                tracing::error!(error = %e, "Auth record corrupt or unencodable");
            }
            AuthError::OrphanedSession => {
                tracing::error!("Session refers to a missing account");
            }
            AuthError::SessionIdCollision => {
                tracing::error!("Generated session id collided with a stored session");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::PasswordMismatch.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::DuplicateAccount.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::SessionNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AuthError::OrphanedSession.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors_surface_verbatim() {
        let err = AuthError::DuplicateAccount;
        assert_eq!(
            err.to_app_error().message(),
            "An account with that username already exists"
        );
    }

    #[test]
    fn test_server_faults_are_opaque() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "users.jsonl: EACCES");
        let err = AuthError::Storage(io);
        let app = err.to_app_error();
        assert_eq!(app.message(), "Internal server error");
        assert!(!app.message().contains("EACCES"));

        assert_eq!(
            AuthError::OrphanedSession.to_app_error().message(),
            "Internal server error"
        );
    }

    #[test]
    fn test_wrong_cookie_name_is_unauthorized() {
        let err = AuthError::WrongCookieName("tracking_id".to_string());
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
