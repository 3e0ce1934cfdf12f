//! POST /tenants

use axum::{extract::State, http::StatusCode, Json};

use orvio_api_auth::{ErrorResponse, Principal};

use crate::error::TenantError;
use crate::handlers::require_super_admin;
use crate::models::{CreateTenantRequest, CreateTenantResponse};
use crate::state::TenantsState;

/// Create a tenant and provision its owner. The owner credential in the
/// response is shown exactly once.
#[utoipa::path(
    post,
    path = "/tenants",
    tag = "tenants",
    security(("bearer_auth" = [])),
    request_body = CreateTenantRequest,
    responses(
        (status = 201, description = "Tenant created", body = CreateTenantResponse),
        (status = 400, description = "Invalid name, slug, or contact", body = ErrorResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
        (status = 409, description = "Slug or owner email already taken", body = ErrorResponse),
    )
)]
pub async fn create_tenant(
    State(state): State<TenantsState>,
    principal: Principal,
    Json(req): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<CreateTenantResponse>), TenantError> {
    require_super_admin(&principal)?;

    let (tenant, owner) = state.provisioning.create(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTenantResponse {
            tenant: tenant.into(),
            owner,
        }),
    ))
}
