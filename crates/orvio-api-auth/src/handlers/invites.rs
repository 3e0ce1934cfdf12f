//! POST /auth/invites/accept

use axum::{extract::State, Json};

use crate::error::{ApiAuthError, ErrorResponse};
use crate::models::{check, validate_password_baseline, AcceptInviteRequest, LoginResponse};
use crate::state::AuthState;

/// Redeem a one-time owner invite, setting the password and issuing a
/// first session.
#[utoipa::path(
    post,
    path = "/auth/invites/accept",
    tag = "auth",
    request_body = AcceptInviteRequest,
    responses(
        (status = 200, description = "Invite redeemed, session issued", body = LoginResponse),
        (status = 400, description = "Malformed request or weak password", body = ErrorResponse),
        (status = 410, description = "Invite unknown, expired, or already used", body = ErrorResponse),
    )
)]
pub async fn accept_invite(
    State(state): State<AuthState>,
    Json(req): Json<AcceptInviteRequest>,
) -> Result<Json<LoginResponse>, ApiAuthError> {
    check(&req)?;
    validate_password_baseline(&req.password)?;

    let (token, principal) = state
        .auth_service
        .accept_invite(&req.code, &req.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth_service.token_ttl_secs(),
        principal: principal.into(),
    }))
}
