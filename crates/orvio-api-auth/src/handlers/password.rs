//! POST /auth/password

use axum::{extract::State, http::StatusCode, Json};

use orvio_core::PrincipalId;

use crate::error::{ApiAuthError, ErrorResponse};
use crate::middleware::Principal;
use crate::models::{check, validate_password_baseline, ChangePasswordRequest};
use crate::state::AuthState;

/// Change the caller's own password.
#[utoipa::path(
    post,
    path = "/auth/password",
    tag = "auth",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Weak new password", body = ErrorResponse),
        (status = 401, description = "Wrong current password or invalid session", body = ErrorResponse),
    )
)]
pub async fn change_password(
    State(state): State<AuthState>,
    principal: Principal,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiAuthError> {
    check(&req)?;
    validate_password_baseline(&req.new_password)?;

    state
        .auth_service
        .change_password(
            PrincipalId::from_uuid(principal.id),
            &req.current_password,
            &req.new_password,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
