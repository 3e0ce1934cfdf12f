//! Tenant persistence: trait contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use orvio_core::TenantId;

use crate::error::StoreError;
use crate::models::tenant::{Tenant, TenantStatus};

/// Mutation applied to a tenant inside a single atomic update.
pub type TenantMutation = Box<dyn FnOnce(&mut Tenant) + Send>;

/// Store contract for tenants.
///
/// `update_status` is an optimistic compare-and-set keyed on the
/// caller's expected current status; a concurrent change surfaces as
/// `StaleStatus` rather than a lost update. Every other mutation goes
/// through `update_with`, which runs against current state inside one
/// atomic update so concurrent writers cannot interleave into a lost
/// update.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Persist a new tenant. Fails with `DuplicateSlug` when the slug
    /// is taken.
    async fn create(&self, tenant: Tenant) -> Result<Tenant, StoreError>;

    /// Lookup by ID.
    async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, StoreError>;

    /// Lookup by slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError>;

    /// All tenants, ordered by creation time.
    async fn list(&self) -> Result<Vec<Tenant>, StoreError>;

    /// Compare-and-set status transition.
    async fn update_status(
        &self,
        id: TenantId,
        expected: TenantStatus,
        new: TenantStatus,
    ) -> Result<Tenant, StoreError>;

    /// Apply `apply` to the stored tenant as a single atomic update and
    /// return the result. The closure sees current state, never a
    /// caller-side snapshot.
    async fn update_with(
        &self,
        id: TenantId,
        apply: TenantMutation,
    ) -> Result<Tenant, StoreError>;

    /// Remove a tenant. Used only as a compensating action when owner
    /// provisioning fails after the tenant row was persisted.
    async fn delete(&self, id: TenantId) -> Result<(), StoreError>;
}

/// In-memory tenant store.
///
/// The compare-and-set in `update_status` happens under a single write
/// lock acquisition, which is the in-memory equivalent of a conditional
/// single-document update.
#[derive(Default)]
pub struct InMemoryTenantStore {
    inner: RwLock<HashMap<Uuid, Tenant>>,
}

impl InMemoryTenantStore {
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

    async fn mutate<F>(&self, id: TenantId, f: F) -> Result<Tenant, StoreError>
    where
        F: FnOnce(&mut Tenant),
    {
        let mut map = self.inner.write().await;
        let tenant = map
            .get_mut(id.as_uuid())
            .ok_or_else(|| StoreError::tenant_not_found(id))?;

        f(tenant);
        tenant.updated_at = Utc::now();
        Ok(tenant.clone())
    }
}

#[async_trait]
impl TenantStore for InMemoryTenantStore {
    async fn create(&self, tenant: Tenant) -> Result<Tenant, StoreError> {
        let mut map = self.inner.write().await;

        if map.values().any(|t| t.slug == tenant.slug) {
            return Err(StoreError::DuplicateSlug(tenant.slug));
        }

        map.insert(*tenant.id.as_uuid(), tenant.clone());
        Ok(tenant)
    }

    async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.get(id.as_uuid()).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.values().find(|t| t.slug == slug).cloned())
    }

    async fn list(&self) -> Result<Vec<Tenant>, StoreError> {
        let map = self.inner.read().await;
        let mut tenants: Vec<Tenant> = map.values().cloned().collect();
        tenants.sort_by_key(|t| t.created_at);
        Ok(tenants)
    }

    async fn update_status(
        &self,
        id: TenantId,
        expected: TenantStatus,
        new: TenantStatus,
    ) -> Result<Tenant, StoreError> {
        let mut map = self.inner.write().await;
        let tenant = map
            .get_mut(id.as_uuid())
            .ok_or_else(|| StoreError::tenant_not_found(id))?;

        if tenant.status != expected {
            return Err(StoreError::StaleStatus {
                expected,
                actual: tenant.status,
            });
        }

        tenant.status = new;
        tenant.updated_at = Utc::now();
        Ok(tenant.clone())
    }

    async fn update_with(
        &self,
        id: TenantId,
        apply: TenantMutation,
    ) -> Result<Tenant, StoreError> {
        self.mutate(id, apply).await
    }

    async fn delete(&self, id: TenantId) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        map.remove(id.as_uuid())
            .map(|_| ())
            .ok_or_else(|| StoreError::tenant_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tenant::{PrimaryContact, SecurityPolicy, TenantQuotas};
    use std::collections::BTreeSet;

    fn tenant(slug: &str) -> Tenant {
        let now = Utc::now();
        Tenant {
            id: TenantId::new(),
            name: slug.to_string(),
            slug: slug.to_string(),
            status: TenantStatus::Trial,
            region: "eu-west-1".to_string(),
            contact: PrimaryContact {
                name: "Owner".to_string(),
                email: format!("owner@{slug}.com"),
                ..Default::default()
            },
            features: BTreeSet::new(),
            modules: BTreeSet::new(),
            quotas: TenantQuotas::default(),
            security: SecurityPolicy::default(),
            inbound_emails: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_and_lookup() {
        let store = InMemoryTenantStore::new();
        let created = store.create(tenant("acme")).await.unwrap();

        assert!(store.find_by_id(created.id).await.unwrap().is_some());
        assert!(store.find_by_slug("acme").await.unwrap().is_some());
        assert!(store.find_by_slug("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let store = InMemoryTenantStore::new();
        store.create(tenant("acme")).await.unwrap();

        let err = store.create(tenant("acme")).await.unwrap_err();
        assert_eq!(err, StoreError::DuplicateSlug("acme".to_string()));
    }

    #[tokio::test]
    async fn list_orders_by_creation() {
        let store = InMemoryTenantStore::new();
        store.create(tenant("first")).await.unwrap();
        store.create(tenant("second")).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at <= all[1].created_at);
    }

    #[tokio::test]
    async fn status_cas_applies_when_expectation_holds() {
        let store = InMemoryTenantStore::new();
        let created = store.create(tenant("acme")).await.unwrap();

        let updated = store
            .update_status(created.id, TenantStatus::Trial, TenantStatus::Active)
            .await
            .unwrap();
        assert_eq!(updated.status, TenantStatus::Active);
    }

    #[tokio::test]
    async fn status_cas_detects_concurrent_change() {
        let store = InMemoryTenantStore::new();
        let created = store.create(tenant("acme")).await.unwrap();

        store
            .update_status(created.id, TenantStatus::Trial, TenantStatus::Active)
            .await
            .unwrap();

        // A second writer still expecting Trial loses the race.
        let err = store
            .update_status(created.id, TenantStatus::Trial, TenantStatus::Inactive)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::StaleStatus {
                expected: TenantStatus::Trial,
                actual: TenantStatus::Active,
            }
        );
    }

    #[tokio::test]
    async fn update_with_mutates_in_place() {
        let store = InMemoryTenantStore::new();
        let created = store.create(tenant("acme")).await.unwrap();

        let updated = store
            .update_with(
                created.id,
                Box::new(|t| {
                    t.quotas = TenantQuotas {
                        seats: 100,
                        ..TenantQuotas::default()
                    };
                    t.security.mfa_required = true;
                }),
            )
            .await
            .unwrap();
        assert_eq!(updated.quotas.seats, 100);
        assert!(updated.security.mfa_required);
        assert!(updated.updated_at >= created.updated_at);

        let err = store
            .update_with(TenantId::new(), Box::new(|_| {}))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn sequential_mutations_never_lose_writes() {
        let store = InMemoryTenantStore::new();
        let created = store.create(tenant("acme")).await.unwrap();

        // Each closure sees the state left by the previous one, so the
        // second add cannot clobber the first.
        store
            .update_with(
                created.id,
                Box::new(|t| {
                    t.inbound_emails.insert("a@acme.com".to_string());
                }),
            )
            .await
            .unwrap();
        let updated = store
            .update_with(
                created.id,
                Box::new(|t| {
                    t.inbound_emails.insert("b@acme.com".to_string());
                }),
            )
            .await
            .unwrap();

        let expected: BTreeSet<String> = ["a@acme.com".to_string(), "b@acme.com".to_string()]
            .into_iter()
            .collect();
        assert_eq!(updated.inbound_emails, expected);
    }

    #[tokio::test]
    async fn delete_and_not_found() {
        let store = InMemoryTenantStore::new();
        let created = store.create(tenant("acme")).await.unwrap();

        store.delete(created.id).await.unwrap();
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
        assert!(store.delete(created.id).await.unwrap_err().is_not_found());
    }
}
