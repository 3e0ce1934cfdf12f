//! Error types for the tenant lifecycle API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use orvio_api_auth::ErrorResponse;
use orvio_store::{StoreError, TenantStatus};

/// Errors surfaced by the tenant lifecycle API.
#[derive(Debug, Error)]
pub enum TenantError {
    /// Malformed input.
    #[error("{0}")]
    Validation(String),

    /// Malformed input attributable to one field.
    #[error("{message}")]
    ValidationField { field: String, message: String },

    /// Referenced entity absent.
    #[error("{0}")]
    NotFound(String),

    /// The slug is already taken.
    #[error("Slug '{0}' is already in use")]
    DuplicateSlug(String),

    /// The owner email is already registered.
    #[error("Email already registered")]
    DuplicateEmail,

    /// The status state machine forbids this move.
    #[error("Cannot transition tenant from '{from}' to '{to}'")]
    InvalidTransition {
        from: TenantStatus,
        to: TenantStatus,
    },

    /// Lost an optimistic-concurrency race.
    #[error("{0}")]
    Conflict(String),

    /// The caller's role does not permit this action.
    #[error("Forbidden")]
    Forbidden,

    /// Unexpected failure; detail is logged, never sent to the client.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for TenantError {
    fn into_response(self) -> Response {
        let (status, error_code, message, field) = match &self {
            TenantError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone(), None)
            }
            TenantError::ValidationField { field, message } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message.clone(),
                Some(field.clone()),
            ),
            TenantError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "not_found", msg.clone(), None)
            }
            TenantError::DuplicateSlug(_) => {
                (StatusCode::CONFLICT, "conflict", self.to_string(), None)
            }
            TenantError::DuplicateEmail => {
                (StatusCode::CONFLICT, "conflict", self.to_string(), None)
            }
            TenantError::InvalidTransition { .. } => (
                StatusCode::CONFLICT,
                "invalid_transition",
                self.to_string(),
                None,
            ),
            TenantError::Conflict(msg) => {
                (StatusCode::CONFLICT, "conflict", msg.clone(), None)
            }
            TenantError::Forbidden => (
                StatusCode::FORBIDDEN,
                "forbidden",
                "Forbidden".to_string(),
                None,
            ),
            TenantError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal error in tenants API");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error_code.to_string(),
            message,
            field,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for TenantError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateSlug(slug) => TenantError::DuplicateSlug(slug),
            StoreError::DuplicateEmail => TenantError::DuplicateEmail,
            StoreError::NotFound { .. } => TenantError::NotFound(err.to_string()),
            StoreError::StaleStatus { .. } => {
                TenantError::Conflict("Tenant status changed concurrently".to_string())
            }
        }
    }
}

impl From<orvio_auth::AuthError> for TenantError {
    fn from(err: orvio_auth::AuthError) -> Self {
        TenantError::Internal(err.to_string())
    }
}
