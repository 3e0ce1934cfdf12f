//! PATCH /tenants/{id}/status and POST /tenants/{id}/reactivate

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use orvio_api_auth::{ErrorResponse, Principal};
use orvio_core::TenantId;

use crate::error::TenantError;
use crate::handlers::require_super_admin;
use crate::models::{TenantResponse, UpdateTenantStatusRequest};
use crate::state::TenantsState;

/// Move a tenant through the status state machine.
#[utoipa::path(
    patch,
    path = "/tenants/{id}/status",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenant ID")),
    request_body = UpdateTenantStatusRequest,
    responses(
        (status = 200, description = "Status applied (or no-op)", body = TenantResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
        (status = 404, description = "No such tenant", body = ErrorResponse),
        (status = 409, description = "Illegal transition or concurrent change", body = ErrorResponse),
    )
)]
pub async fn update_status(
    State(state): State<TenantsState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTenantStatusRequest>,
) -> Result<Json<TenantResponse>, TenantError> {
    require_super_admin(&principal)?;

    let tenant = state
        .lifecycle
        .update_status(TenantId::from_uuid(id), req.status)
        .await?;
    Ok(Json(tenant.into()))
}

/// Reactivate a suspended or inactive tenant.
#[utoipa::path(
    post,
    path = "/tenants/{id}/reactivate",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Tenant is active again", body = TenantResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
        (status = 404, description = "No such tenant", body = ErrorResponse),
        (status = 409, description = "Tenant is in trial; nothing to reactivate", body = ErrorResponse),
    )
)]
pub async fn reactivate(
    State(state): State<TenantsState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<TenantResponse>, TenantError> {
    require_super_admin(&principal)?;

    let tenant = state.lifecycle.reactivate(TenantId::from_uuid(id)).await?;
    Ok(Json(tenant.into()))
}
