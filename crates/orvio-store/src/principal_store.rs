//! Principal persistence: trait contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use orvio_core::PrincipalId;

use crate::error::StoreError;
use crate::models::principal::{AdminPrincipal, NewPrincipal, PrincipalStatus};

/// Store contract for admin principals.
///
/// Email lookups are case-insensitive; `create` enforces global email
/// uniqueness. Each mutating method is a single atomic write.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Persist a new principal. Fails with `DuplicateEmail` when the
    /// email is already registered (case-insensitive).
    async fn create(&self, principal: NewPrincipal) -> Result<AdminPrincipal, StoreError>;

    /// Case-insensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminPrincipal>, StoreError>;

    /// Lookup by ID.
    async fn find_by_id(&self, id: PrincipalId) -> Result<Option<AdminPrincipal>, StoreError>;

    /// Change a principal's lifecycle status.
    async fn update_status(
        &self,
        id: PrincipalId,
        status: PrincipalStatus,
    ) -> Result<AdminPrincipal, StoreError>;

    /// Replace a principal's password hash.
    async fn update_password(
        &self,
        id: PrincipalId,
        password_hash: String,
    ) -> Result<AdminPrincipal, StoreError>;

    /// Remove a principal. Used only as a compensating action when
    /// tenant provisioning fails partway.
    async fn delete(&self, id: PrincipalId) -> Result<(), StoreError>;
}

/// In-memory principal store.
#[derive(Default)]
pub struct InMemoryPrincipalStore {
    inner: RwLock<HashMap<Uuid, AdminPrincipal>>,
}

impl InMemoryPrincipalStore {
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
impl PrincipalStore for InMemoryPrincipalStore {
    async fn create(&self, principal: NewPrincipal) -> Result<AdminPrincipal, StoreError> {
        let record = principal.into_principal();
        let mut map = self.inner.write().await;

        if map.values().any(|p| p.email == record.email) {
            return Err(StoreError::DuplicateEmail);
        }

        map.insert(*record.id.as_uuid(), record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminPrincipal>, StoreError> {
        let needle = email.to_lowercase();
        let map = self.inner.read().await;
        Ok(map.values().find(|p| p.email == needle).cloned())
    }

    async fn find_by_id(&self, id: PrincipalId) -> Result<Option<AdminPrincipal>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.get(id.as_uuid()).cloned())
    }

    async fn update_status(
        &self,
        id: PrincipalId,
        status: PrincipalStatus,
    ) -> Result<AdminPrincipal, StoreError> {
        let mut map = self.inner.write().await;
        let record = map
            .get_mut(id.as_uuid())
            .ok_or_else(|| StoreError::principal_not_found(id))?;

        record.status = status;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn update_password(
        &self,
        id: PrincipalId,
        password_hash: String,
    ) -> Result<AdminPrincipal, StoreError> {
        let mut map = self.inner.write().await;
        let record = map
            .get_mut(id.as_uuid())
            .ok_or_else(|| StoreError::principal_not_found(id))?;

        record.password_hash = Some(password_hash);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, id: PrincipalId) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        map.remove(id.as_uuid())
            .map(|_| ())
            .ok_or_else(|| StoreError::principal_not_found(id))
    }
}
