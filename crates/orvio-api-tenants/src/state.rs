//! Shared state for the tenant lifecycle routers.

use std::sync::Arc;

use orvio_auth::PasswordHasher;
use orvio_store::{InviteStore, PrincipalStore, TenantStatus, TenantStore};

use crate::services::{LifecycleService, ProvisioningService};

/// State shared by the tenant handlers.
#[derive(Clone)]
pub struct TenantsState {
    pub provisioning: Arc<ProvisioningService>,
    pub lifecycle: Arc<LifecycleService>,
}

impl TenantsState {
    /// Wire up the services over the given stores.
    #[must_use]
    pub fn new(
        tenants: Arc<dyn TenantStore>,
        principals: Arc<dyn PrincipalStore>,
        invites: Arc<dyn InviteStore>,
        hasher: PasswordHasher,
        default_status: TenantStatus,
    ) -> Self {
        Self {
            provisioning: Arc::new(ProvisioningService::new(
                tenants.clone(),
                principals,
                invites,
                hasher,
                default_status,
            )),
            lifecycle: Arc::new(LifecycleService::new(tenants)),
        }
    }
}
