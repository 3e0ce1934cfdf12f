//! Request and response types for the authentication API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use orvio_core::Role;
use orvio_store::{AdminPrincipal, PrincipalStatus};

use crate::error::ApiAuthError;

/// Login request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed compact session token.
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub principal: PrincipalProfile,
}

/// Invite acceptance request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AcceptInviteRequest {
    #[validate(length(min = 1, message = "Invite code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request for the authenticated principal.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Request to create an admin principal.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePrincipalRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Omitted to have a one-time password generated and revealed once.
    pub password: Option<String>,
    pub role: Role,
    /// Required for tenant-scoped roles, forbidden for super admins.
    pub tenant_id: Option<Uuid>,
}

/// Response to principal creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatePrincipalResponse {
    pub principal: PrincipalProfile,
    /// Present only when the server generated the password. Shown once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_password: Option<String>,
}

/// Request to change a principal's lifecycle status.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePrincipalStatusRequest {
    pub status: PrincipalStatus,
}

/// Public view of a principal. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrincipalProfile {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub status: PrincipalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
}

impl From<AdminPrincipal> for PrincipalProfile {
    fn from(p: AdminPrincipal) -> Self {
        Self {
            id: *p.id.as_uuid(),
            email: p.email,
            role: p.role,
            status: p.status,
            tenant_id: p.tenant_id.map(|t| *t.as_uuid()),
        }
    }
}

/// Flatten validator errors into a single `Validation` error.
pub fn check<T: Validate>(req: &T) -> Result<(), ApiAuthError> {
    req.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .filter_map(|e| e.message.as_ref().map(ToString::to_string))
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());
        ApiAuthError::Validation(message)
    })
}

/// Baseline password rules applied to every chosen password: at least
/// 8 characters with at least one letter and one digit.
pub fn validate_password_baseline(password: &str) -> Result<(), ApiAuthError> {
    if password.len() < 8 {
        return Err(ApiAuthError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(ApiAuthError::Validation(
            "Password must contain a letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ApiAuthError::Validation(
            "Password must contain a digit".to_string(),
        ));
    }
    Ok(())
}
