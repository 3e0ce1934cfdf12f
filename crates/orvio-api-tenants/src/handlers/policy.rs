//! Quotas, security policy, password policy, and inbound-email routes.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use orvio_api_auth::{ErrorResponse, Principal};
use orvio_core::TenantId;

use crate::error::TenantError;
use crate::handlers::require_super_admin;
use crate::models::{
    AddInboundEmailRequest, PasswordPolicyRequest, QuotaPatch, SecurityPatch, TenantResponse,
};
use crate::state::TenantsState;

/// Patch tenant quotas.
#[utoipa::path(
    patch,
    path = "/tenants/{id}/quotas",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenant ID")),
    request_body = QuotaPatch,
    responses(
        (status = 200, description = "Quotas updated", body = TenantResponse),
        (status = 400, description = "Negative quota (seats may be -1)", body = ErrorResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
        (status = 404, description = "No such tenant", body = ErrorResponse),
    )
)]
pub async fn update_quotas(
    State(state): State<TenantsState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(patch): Json<QuotaPatch>,
) -> Result<Json<TenantResponse>, TenantError> {
    require_super_admin(&principal)?;

    let tenant = state
        .lifecycle
        .update_quotas(TenantId::from_uuid(id), patch)
        .await?;
    Ok(Json(tenant.into()))
}

/// Merge a security-policy patch.
#[utoipa::path(
    patch,
    path = "/tenants/{id}/security",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenant ID")),
    request_body = SecurityPatch,
    responses(
        (status = 200, description = "Security policy updated", body = TenantResponse),
        (status = 400, description = "Empty IP list entry", body = ErrorResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
        (status = 404, description = "No such tenant", body = ErrorResponse),
    )
)]
pub async fn update_security(
    State(state): State<TenantsState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(patch): Json<SecurityPatch>,
) -> Result<Json<TenantResponse>, TenantError> {
    require_super_admin(&principal)?;

    let tenant = state
        .lifecycle
        .update_security(TenantId::from_uuid(id), patch)
        .await?;
    Ok(Json(tenant.into()))
}

/// Replace the tenant's password policy.
#[utoipa::path(
    put,
    path = "/tenants/{id}/security/password-policy",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenant ID")),
    request_body = PasswordPolicyRequest,
    responses(
        (status = 200, description = "Password policy replaced", body = TenantResponse),
        (status = 400, description = "min_length out of range", body = ErrorResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
        (status = 404, description = "No such tenant", body = ErrorResponse),
    )
)]
pub async fn set_password_policy(
    State(state): State<TenantsState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<PasswordPolicyRequest>,
) -> Result<Json<TenantResponse>, TenantError> {
    require_super_admin(&principal)?;

    let policy = req.validate()?;
    let tenant = state
        .lifecycle
        .set_password_policy(TenantId::from_uuid(id), policy)
        .await?;
    Ok(Json(tenant.into()))
}

/// Register an inbound-ingestion address. Idempotent.
#[utoipa::path(
    post,
    path = "/tenants/{id}/inbound-emails",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Tenant ID")),
    request_body = AddInboundEmailRequest,
    responses(
        (status = 200, description = "Address registered", body = TenantResponse),
        (status = 400, description = "Invalid email address", body = ErrorResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
        (status = 404, description = "No such tenant", body = ErrorResponse),
    )
)]
pub async fn add_inbound_email(
    State(state): State<TenantsState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<AddInboundEmailRequest>,
) -> Result<Json<TenantResponse>, TenantError> {
    require_super_admin(&principal)?;

    let tenant = state
        .lifecycle
        .add_inbound_email(TenantId::from_uuid(id), &req.email)
        .await?;
    Ok(Json(tenant.into()))
}

/// Deregister an inbound-ingestion address. Removing an absent address
/// succeeds.
#[utoipa::path(
    delete,
    path = "/tenants/{id}/inbound-emails/{email}",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Tenant ID"),
        ("email" = String, Path, description = "Address to remove"),
    ),
    responses(
        (status = 200, description = "Address absent after the call", body = TenantResponse),
        (status = 403, description = "Caller is not a super admin", body = ErrorResponse),
        (status = 404, description = "No such tenant", body = ErrorResponse),
    )
)]
pub async fn remove_inbound_email(
    State(state): State<TenantsState>,
    principal: Principal,
    Path((id, email)): Path<(Uuid, String)>,
) -> Result<Json<TenantResponse>, TenantError> {
    require_super_admin(&principal)?;

    let tenant = state
        .lifecycle
        .remove_inbound_email(TenantId::from_uuid(id), &email)
        .await?;
    Ok(Json(tenant.into()))
}
