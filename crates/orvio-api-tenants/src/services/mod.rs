//! Business logic behind the tenant lifecycle API.

pub mod lifecycle_service;
pub mod provisioning_service;
pub mod slug_service;

pub use lifecycle_service::LifecycleService;
pub use provisioning_service::ProvisioningService;
