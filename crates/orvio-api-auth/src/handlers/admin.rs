//! /admin/principals - super-admin only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use orvio_core::{PrincipalId, Role, TenantId};

use crate::error::{ApiAuthError, ErrorResponse};
use crate::middleware::Principal;
use crate::models::{
    check, CreatePrincipalRequest, CreatePrincipalResponse, PrincipalProfile,
    UpdatePrincipalStatusRequest,
};
use crate::state::AuthState;

/// Create an admin principal.
#[utoipa::path(
    post,
    path = "/admin/principals",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = CreatePrincipalRequest,
    responses(
        (status = 201, description = "Principal created", body = CreatePrincipalResponse),
        (status = 400, description = "Invalid role/tenant pairing or weak password", body = ErrorResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    )
)]
pub async fn create_principal(
    State(state): State<AuthState>,
    principal: Principal,
    Json(req): Json<CreatePrincipalRequest>,
) -> Result<(StatusCode, Json<CreatePrincipalResponse>), ApiAuthError> {
    principal.require_any_role(&[Role::SuperAdmin])?;
    check(&req)?;

    let (created, generated_password) = state
        .principal_service
        .create(
            &req.email,
            req.password.as_deref(),
            req.role,
            req.tenant_id.map(TenantId::from_uuid),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePrincipalResponse {
            principal: created.into(),
            generated_password,
        }),
    ))
}

/// Suspend or reinstate a principal.
#[utoipa::path(
    patch,
    path = "/admin/principals/{id}/status",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Principal ID")),
    request_body = UpdatePrincipalStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = PrincipalProfile),
        (status = 400, description = "Self-status change", body = ErrorResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
        (status = 404, description = "No such principal", body = ErrorResponse),
    )
)]
pub async fn update_principal_status(
    State(state): State<AuthState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePrincipalStatusRequest>,
) -> Result<Json<PrincipalProfile>, ApiAuthError> {
    principal.require_any_role(&[Role::SuperAdmin])?;

    let updated = state
        .principal_service
        .set_status(
            PrincipalId::from_uuid(principal.id),
            PrincipalId::from_uuid(id),
            req.status,
        )
        .await?;

    Ok(Json(updated.into()))
}
