//! orvio core library
//!
//! Shared types for the orvio control plane.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (`TenantId`, `PrincipalId`, `InviteId`)
//! - [`roles`] - The closed [`Role`](roles::Role) enumeration and the
//!   [`authorize`](roles::authorize) predicate

pub mod ids;
pub mod roles;

pub use ids::{InviteId, ParseIdError, PrincipalId, TenantId};
pub use roles::{authorize, Role};
