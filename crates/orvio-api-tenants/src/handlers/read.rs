//! GET /tenants and GET /tenants/{id}

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use orvio_api_auth::{ErrorResponse, Principal};
use orvio_core::TenantId;

use crate::error::TenantError;
use crate::handlers::{require_super_admin, require_tenant_read};
use crate::models::TenantResponse;
use crate::state::TenantsState;

/// List all tenants.
#[utoipa::path(
    get,
    path = "/tenants",
    tag = "tenants",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tenants, oldest first", body = [TenantResponse]),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
    )
)]
pub async fn list_tenants(
    State(state): State<TenantsState>,
    principal: Principal,
) -> Result<Json<Vec<TenantResponse>>, TenantError> {
    require_super_admin(&principal)?;

    let tenants = state.lifecycle.list().await?;
    Ok(Json(tenants.into_iter().map(Into::into).collect()))
}

/// Fetch one tenant.
#[utoipa::path(
    get,
    path = "/tenants/{id}",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "The tenant", body = TenantResponse),
        (status = 403, description = "Not the caller's tenant", body = ErrorResponse),
        (status = 404, description = "No such tenant", body = ErrorResponse),
    )
)]
pub async fn get_tenant(
    State(state): State<TenantsState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<TenantResponse>, TenantError> {
    let id = TenantId::from_uuid(id);
    require_tenant_read(&principal, id)?;

    let tenant = state.lifecycle.get(id).await?;
    Ok(Json(tenant.into()))
}
