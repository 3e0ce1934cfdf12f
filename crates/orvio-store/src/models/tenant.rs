//! Tenant model and the status state machine.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orvio_core::TenantId;

/// Sentinel value on `seats` meaning "unlimited".
pub const UNLIMITED_SEATS: i64 = -1;

/// Tenant lifecycle status.
///
/// Legal transitions: `trial ↔ active`, `active ↔ suspended`, and any
/// status may move to `inactive`. Leaving `inactive` happens only
/// through the explicit reactivation operation. Transitioning into the
/// current status is a no-op success.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    Trial,
    Active,
    Suspended,
    Inactive,
}

impl TenantStatus {
    /// Whether `updateStatus` may move a tenant from `self` to `new`.
    ///
    /// Same-status transitions return `true` here; the service layer
    /// treats them as no-ops. Reactivation out of `inactive` is NOT
    /// covered by this table; it has its own operation.
    #[must_use]
    pub fn can_transition_to(self, new: TenantStatus) -> bool {
        use TenantStatus::{Active, Inactive, Suspended, Trial};
        match (self, new) {
            (a, b) if a == b => true,
            (Trial, Active) | (Active, Trial) => true,
            (Active, Suspended) | (Suspended, Active) => true,
            (Trial | Active | Suspended, Inactive) => true,
            _ => false,
        }
    }

    /// Whether a bearer of a token scoped to this tenant may act.
    #[must_use]
    pub fn allows_access(self) -> bool {
        matches!(self, TenantStatus::Trial | TenantStatus::Active)
    }
}

impl std::fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TenantStatus::Trial => "trial",
            TenantStatus::Active => "active",
            TenantStatus::Suspended => "suspended",
            TenantStatus::Inactive => "inactive",
        };
        f.write_str(s)
    }
}

impl FromStr for TenantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trial" => Ok(TenantStatus::Trial),
            "active" => Ok(TenantStatus::Active),
            "suspended" => Ok(TenantStatus::Suspended),
            "inactive" => Ok(TenantStatus::Inactive),
            other => Err(format!("Unknown tenant status: {other}")),
        }
    }
}

/// Primary contact for a tenant organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PrimaryContact {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Resource ceilings assigned to a tenant.
///
/// All values are non-negative; `seats` additionally accepts
/// [`UNLIMITED_SEATS`]. This record is the source of truth for the
/// limit values; enforcement lives in a capacity-check collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TenantQuotas {
    pub seats: i64,
    pub storage_gb: i64,
    pub requests_per_minute: i64,
    pub retention_days: i64,
    pub departments: i64,
    pub roles: i64,
    pub projects: i64,
}

impl Default for TenantQuotas {
    fn default() -> Self {
        Self {
            seats: 25,
            storage_gb: 50,
            requests_per_minute: 600,
            retention_days: 90,
            departments: 10,
            roles: 10,
            projects: 20,
        }
    }
}

/// Policy governing passwords chosen by a tenant's members.
///
/// Read-only through the generic security patch; changed only via the
/// dedicated password-policy operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PasswordPolicy {
    pub min_length: u32,
    pub require_uppercase: bool,
    pub require_digit: bool,
    pub require_symbol: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: false,
            require_digit: true,
            require_symbol: false,
        }
    }
}

/// Security policy for a tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SecurityPolicy {
    pub mfa_required: bool,
    pub sso_enabled: bool,
    pub audit_enabled: bool,
    pub ip_allowlist: BTreeSet<String>,
    pub ip_denylist: BTreeSet<String>,
    pub password_policy: PasswordPolicy,
}

/// One customer organization; the unit of isolation and billing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    /// URL-safe, globally unique, immutable once assigned.
    pub slug: String,
    pub status: TenantStatus,
    pub region: String,
    pub contact: PrimaryContact,
    pub features: BTreeSet<String>,
    pub modules: BTreeSet<String>,
    pub quotas: TenantQuotas,
    pub security: SecurityPolicy,
    /// Deduplicated, lowercase set of inbound-ingestion addresses.
    pub inbound_emails: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use TenantStatus::{Active, Inactive, Suspended, Trial};

    #[test]
    fn transition_table() {
        // trial <-> active
        assert!(Trial.can_transition_to(Active));
        assert!(Active.can_transition_to(Trial));
        // active <-> suspended
        assert!(Active.can_transition_to(Suspended));
        assert!(Suspended.can_transition_to(Active));
        // anything live -> inactive
        assert!(Trial.can_transition_to(Inactive));
        assert!(Active.can_transition_to(Inactive));
        assert!(Suspended.can_transition_to(Inactive));
    }

    #[test]
    fn same_status_is_allowed_as_noop() {
        for status in [Trial, Active, Suspended, Inactive] {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn forbidden_transitions() {
        // trial may not be suspended directly
        assert!(!Trial.can_transition_to(Suspended));
        assert!(!Suspended.can_transition_to(Trial));
        // inactive is an endpoint for updateStatus
        assert!(!Inactive.can_transition_to(Active));
        assert!(!Inactive.can_transition_to(Trial));
        assert!(!Inactive.can_transition_to(Suspended));
    }

    #[test]
    fn access_gate_per_status() {
        assert!(Trial.allows_access());
        assert!(Active.allows_access());
        assert!(!Suspended.allows_access());
        assert!(!Inactive.allows_access());
    }

    #[test]
    fn status_wire_format() {
        assert_eq!(serde_json::to_string(&Trial).unwrap(), "\"trial\"");
        assert_eq!("suspended".parse::<TenantStatus>().unwrap(), Suspended);
        assert!("deleted".parse::<TenantStatus>().is_err());
    }

    #[test]
    fn default_quotas_are_positive() {
        let quotas = TenantQuotas::default();
        assert!(quotas.seats > 0);
        assert!(quotas.storage_gb > 0);
        assert!(quotas.retention_days > 0);
    }

    #[test]
    fn default_password_policy_baseline() {
        let policy = PasswordPolicy::default();
        assert_eq!(policy.min_length, 8);
        assert!(policy.require_digit);
    }
}
