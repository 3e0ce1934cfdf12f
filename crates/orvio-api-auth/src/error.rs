//! Error types for the authentication API.
//!
//! The wire shape is the shared envelope `{ error, message, field? }`.
//! Unknown-email and wrong-password logins both map to
//! `InvalidCredentials`, so the two cases are byte-identical on the
//! wire. Account suspension is the one deliberately distinguishable
//! authentication failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use orvio_auth::AuthError;
use orvio_store::StoreError;

/// Errors surfaced by the authentication API.
#[derive(Debug, Error)]
pub enum ApiAuthError {
    /// Unknown email or wrong password; never disclosed which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The principal exists but is suspended.
    #[error("Account is suspended")]
    AccountSuspended,

    /// Missing, malformed, expired, or revoked-by-status session.
    #[error("{0}")]
    Unauthorized(String),

    /// The principal's role does not permit this action.
    #[error("Forbidden")]
    Forbidden,

    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// Email already registered.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Invite code unknown, expired, or already used.
    #[error("Invite code is invalid or expired")]
    InvalidInvite,

    /// Referenced entity absent.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure; detail is logged, never sent to the client.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response envelope shared by all API errors.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiAuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            ApiAuthError::AccountSuspended => (
                StatusCode::UNAUTHORIZED,
                "account_suspended",
                self.to_string(),
            ),
            ApiAuthError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            ApiAuthError::Forbidden => {
                (StatusCode::FORBIDDEN, "forbidden", "Forbidden".to_string())
            }
            ApiAuthError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            ApiAuthError::DuplicateEmail => {
                (StatusCode::CONFLICT, "conflict", self.to_string())
            }
            ApiAuthError::InvalidInvite => (StatusCode::GONE, "gone", self.to_string()),
            ApiAuthError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiAuthError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal error in auth API");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_code.to_string(),
            message,
            field: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiAuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiAuthError::DuplicateEmail,
            StoreError::NotFound { .. } => ApiAuthError::NotFound(err.to_string()),
            other => ApiAuthError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiAuthError {
    fn from(err: AuthError) -> Self {
        if err.is_token_error() {
            // Signature-validation internals never reach the caller.
            ApiAuthError::Unauthorized("Invalid or expired session".to_string())
        } else {
            ApiAuthError::Internal(err.to_string())
        }
    }
}
