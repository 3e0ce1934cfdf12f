//! POST /auth/login

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};

use crate::error::{ApiAuthError, ErrorResponse};
use crate::models::{check, LoginRequest, LoginResponse};
use crate::services::RequestMeta;
use crate::state::AuthState;

/// Best-effort client IP for the audit trail. Only the first hop of
/// X-Forwarded-For is used.
pub(crate) fn client_ip(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = value.split(',').next()?.trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// Authenticate with email and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session issued", body = LoginResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials or suspended account", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AuthState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiAuthError> {
    check(&req)?;

    let ip = client_ip(&headers);
    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let meta = RequestMeta {
        remote_ip: ip.as_deref(),
        user_agent,
    };
    let (token, principal) = state
        .auth_service
        .login(&req.email, &req.password, meta)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth_service.token_ttl_secs(),
        principal: principal.into(),
    }))
}
