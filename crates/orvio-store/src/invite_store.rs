//! Owner invite persistence: trait contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use orvio_core::InviteId;

use crate::error::StoreError;
use crate::models::invite::OwnerInvite;

/// Store contract for owner invites.
#[async_trait]
pub trait InviteStore: Send + Sync {
    /// Persist a new invite.
    async fn create(&self, invite: OwnerInvite) -> Result<OwnerInvite, StoreError>;

    /// Lookup by the stored code hash.
    async fn find_by_code_hash(&self, code_hash: &str)
        -> Result<Option<OwnerInvite>, StoreError>;

    /// Mark an invite as accepted (single-use enforcement).
    async fn mark_accepted(&self, id: InviteId) -> Result<OwnerInvite, StoreError>;
}

/// In-memory invite store.
#[derive(Default)]
pub struct InMemoryInviteStore {
    inner: RwLock<HashMap<Uuid, OwnerInvite>>,
}

impl InMemoryInviteStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store already wrapped for sharing.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl InviteStore for InMemoryInviteStore {
    async fn create(&self, invite: OwnerInvite) -> Result<OwnerInvite, StoreError> {
        let mut map = self.inner.write().await;
        map.insert(*invite.id.as_uuid(), invite.clone());
        Ok(invite)
    }

    async fn find_by_code_hash(
        &self,
        code_hash: &str,
    ) -> Result<Option<OwnerInvite>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.values().find(|i| i.code_hash == code_hash).cloned())
    }

    async fn mark_accepted(&self, id: InviteId) -> Result<OwnerInvite, StoreError> {
        let mut map = self.inner.write().await;
        let invite = map
            .get_mut(id.as_uuid())
            .ok_or_else(|| StoreError::invite_not_found(id))?;

        invite.accepted_at = Some(Utc::now());
        Ok(invite.clone())
    }
}
