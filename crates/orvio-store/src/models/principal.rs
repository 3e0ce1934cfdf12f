//! Admin principal model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orvio_core::{PrincipalId, Role, TenantId};

/// Lifecycle status of an admin principal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalStatus {
    /// May authenticate and act.
    Active,
    /// Locked out; correct credentials no longer yield a session.
    Suspended,
}

impl std::fmt::Display for PrincipalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrincipalStatus::Active => f.write_str("active"),
            PrincipalStatus::Suspended => f.write_str("suspended"),
        }
    }
}

/// An identity permitted to authenticate against the control plane.
///
/// The email is stored lowercase and is globally unique. `password_hash`
/// is a PHC-format Argon2id string, or `None` while an owner invite is
/// still pending. A tenant-scoped role always carries `Some(tenant_id)`;
/// a super-admin never does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPrincipal {
    pub id: PrincipalId,
    pub email: String,
    /// Never serialized into API responses; only the store sees this.
    pub password_hash: Option<String>,
    pub role: Role,
    pub status: PrincipalStatus,
    pub tenant_id: Option<TenantId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminPrincipal {
    /// True when the principal may obtain a new session.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PrincipalStatus::Active
    }
}

/// Input for creating a principal.
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub email: String,
    /// `None` for invite-based owner provisioning.
    pub password_hash: Option<String>,
    pub role: Role,
    pub tenant_id: Option<TenantId>,
}

impl NewPrincipal {
    /// Materialize the record with fresh ID and timestamps.
    #[must_use]
    pub fn into_principal(self) -> AdminPrincipal {
        let now = Utc::now();
        AdminPrincipal {
            id: PrincipalId::new(),
            email: self.email.to_lowercase(),
            password_hash: self.password_hash,
            role: self.role,
            status: PrincipalStatus::Active,
            tenant_id: self.tenant_id,
            created_at: now,
            updated_at: now,
        }
    }
}
