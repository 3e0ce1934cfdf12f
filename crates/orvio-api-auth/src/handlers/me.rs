//! GET /auth/me

use axum::{extract::State, Json};

use orvio_core::PrincipalId;

use crate::error::{ApiAuthError, ErrorResponse};
use crate::middleware::Principal;
use crate::models::PrincipalProfile;
use crate::state::AuthState;

/// The authenticated caller's own profile, read from live state.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller profile", body = PrincipalProfile),
        (status = 401, description = "Invalid or expired session", body = ErrorResponse),
    )
)]
pub async fn me(
    State(state): State<AuthState>,
    principal: Principal,
) -> Result<Json<PrincipalProfile>, ApiAuthError> {
    let record = state
        .principals
        .find_by_id(PrincipalId::from_uuid(principal.id))
        .await?
        .ok_or_else(|| ApiAuthError::Unauthorized("Invalid or expired session".to_string()))?;

    Ok(Json(record.into()))
}
