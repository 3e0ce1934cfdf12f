//! Role enumeration and the authorization predicate.
//!
//! Roles are a closed set so a typo in a route guard is a compile error,
//! never a silently-open (or silently-closed) endpoint.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Admin roles recognized by the control plane.
///
/// `SuperAdmin` operates across all tenants; the tenant-scoped roles are
/// always bound to exactly one tenant. There is no implicit hierarchy:
/// a role is permitted only where it is listed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator; manages tenant organizations.
    SuperAdmin,
    /// Administrator within a single tenant.
    TenantAdmin,
    /// Regular member within a single tenant.
    TenantUser,
}

impl Role {
    /// Returns true for the tenant-scoped roles.
    #[must_use]
    pub fn is_tenant_scoped(&self) -> bool {
        matches!(self, Role::TenantAdmin | Role::TenantUser)
    }

    /// Wire representation (matches the serde encoding).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::TenantAdmin => "tenant_admin",
            Role::TenantUser => "tenant_user",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl Display for ParseRoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "tenant_admin" => Ok(Role::TenantAdmin),
            "tenant_user" => Ok(Role::TenantUser),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Membership check gating every protected operation.
///
/// Permitted iff `role` is literally present in `allowed`. An empty
/// `allowed` slice denies everyone (fail-closed).
#[must_use]
pub fn authorize(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}
