//! orvio tenant lifecycle API
//!
//! Tenant provisioning (with owner-credential delivery), the status
//! state machine, quota and security-policy management, and the
//! inbound-email address set. All routes live behind the auth resolver
//! middleware from `orvio-api-auth`; the router is composed with it in
//! the binary.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;

pub use error::TenantError;
pub use router::tenants_router;
pub use services::{LifecycleService, ProvisioningService};
pub use state::TenantsState;
