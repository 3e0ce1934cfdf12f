//! HTTP handlers for the tenant lifecycle API.

pub mod lifecycle;
pub mod policy;
pub mod provisioning;
pub mod read;

use orvio_api_auth::Principal;
use orvio_core::{authorize, Role, TenantId};

use crate::error::TenantError;

/// Every tenant mutation, creation, and the list view are platform
/// operations.
pub(crate) fn require_super_admin(principal: &Principal) -> Result<(), TenantError> {
    if authorize(principal.role, &[Role::SuperAdmin]) {
        Ok(())
    } else {
        Err(TenantError::Forbidden)
    }
}

/// Reading a single tenant is also open to that tenant's own admin.
pub(crate) fn require_tenant_read(
    principal: &Principal,
    tenant_id: TenantId,
) -> Result<(), TenantError> {
    if authorize(principal.role, &[Role::SuperAdmin]) {
        return Ok(());
    }
    if authorize(principal.role, &[Role::TenantAdmin]) && principal.tenant() == Some(tenant_id) {
        return Ok(());
    }
    Err(TenantError::Forbidden)
}
