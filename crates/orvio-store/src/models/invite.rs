//! Owner invite model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orvio_core::{InviteId, PrincipalId, TenantId};

/// A one-time code letting a tenant's owner set their initial password
/// out-of-band.
///
/// Only the SHA-256 hash of the code is stored; the raw code is
/// returned once by the provisioning call and never again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerInvite {
    pub id: InviteId,
    pub principal_id: PrincipalId,
    pub tenant_id: TenantId,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OwnerInvite {
    /// True when the invite can still be redeemed.
    #[must_use]
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        self.accepted_at.is_none() && now < self.expires_at
    }
}
