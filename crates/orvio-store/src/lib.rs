//! orvio persistence layer
//!
//! Models and store traits for the control plane's two aggregates
//! (admin principals and tenants) plus owner invites. The traits keep
//! the atomicity contract explicit — notably the compare-and-set on
//! tenant status — so any backing store has to honor it.
//!
//! The shipped implementations are in-memory (`tokio::sync::RwLock`
//! over hash maps); the API crates only ever see the trait objects.

pub mod error;
pub mod invite_store;
pub mod models;
pub mod principal_store;
pub mod tenant_store;

pub use error::StoreError;
pub use invite_store::{InMemoryInviteStore, InviteStore};
pub use models::invite::OwnerInvite;
pub use models::principal::{AdminPrincipal, NewPrincipal, PrincipalStatus};
pub use models::tenant::{
    PasswordPolicy, PrimaryContact, SecurityPolicy, Tenant, TenantQuotas, TenantStatus,
    UNLIMITED_SEATS,
};
pub use principal_store::{InMemoryPrincipalStore, PrincipalStore};
pub use tenant_store::{InMemoryTenantStore, TenantMutation, TenantStore};
