//! Tenant lifecycle: status machine, quotas, security policy, and the
//! inbound-email set.

use std::sync::Arc;

use orvio_core::TenantId;
use orvio_store::{
    PasswordPolicy, Tenant, TenantQuotas, TenantStatus, TenantStore, UNLIMITED_SEATS,
};

use crate::error::TenantError;
use crate::models::{is_valid_email, QuotaPatch, SecurityPatch};

/// All tenant mutations after creation, plus reads.
pub struct LifecycleService {
    tenants: Arc<dyn TenantStore>,
}

impl LifecycleService {
    pub fn new(tenants: Arc<dyn TenantStore>) -> Self {
        Self { tenants }
    }

    pub async fn get(&self, id: TenantId) -> Result<Tenant, TenantError> {
        self.tenants
            .find_by_id(id)
            .await?
            .ok_or_else(|| TenantError::NotFound(format!("Tenant {id} not found")))
    }

    pub async fn list(&self) -> Result<Vec<Tenant>, TenantError> {
        Ok(self.tenants.list().await?)
    }

    /// Apply a status transition through the state machine.
    ///
    /// Transitioning into the current status is a no-op success. The
    /// store applies the change conditionally on the status the guard
    /// saw; losing that race is a `Conflict`.
    pub async fn update_status(
        &self,
        id: TenantId,
        new: TenantStatus,
    ) -> Result<Tenant, TenantError> {
        let tenant = self.get(id).await?;

        if tenant.status == new {
            return Ok(tenant);
        }
        if !tenant.status.can_transition_to(new) {
            return Err(TenantError::InvalidTransition {
                from: tenant.status,
                to: new,
            });
        }

        let updated = self.tenants.update_status(id, tenant.status, new).await?;

        tracing::info!(
            target: "audit",
            event = "tenant_status_changed",
            tenant_id = %id,
            from = %tenant.status,
            to = %new,
        );

        Ok(updated)
    }

    /// The only path out of `inactive`: back to `active`. Also lifts a
    /// suspension; a no-op on an already-active tenant.
    pub async fn reactivate(&self, id: TenantId) -> Result<Tenant, TenantError> {
        let tenant = self.get(id).await?;

        match tenant.status {
            TenantStatus::Active => Ok(tenant),
            TenantStatus::Suspended | TenantStatus::Inactive => {
                let updated = self
                    .tenants
                    .update_status(id, tenant.status, TenantStatus::Active)
                    .await?;

                tracing::info!(
                    target: "audit",
                    event = "tenant_reactivated",
                    tenant_id = %id,
                    from = %tenant.status,
                );

                Ok(updated)
            }
            TenantStatus::Trial => Err(TenantError::InvalidTransition {
                from: TenantStatus::Trial,
                to: TenantStatus::Active,
            }),
        }
    }

    /// Patch quotas. Provided fields replace current values; everything
    /// must be non-negative except `seats`, which also accepts the
    /// unlimited sentinel. Validation happens up front; the merge runs
    /// against current state inside the store's atomic update, so a
    /// concurrent patch of other fields is never clobbered.
    pub async fn update_quotas(
        &self,
        id: TenantId,
        patch: QuotaPatch,
    ) -> Result<Tenant, TenantError> {
        if let Some(seats) = patch.seats {
            if seats < UNLIMITED_SEATS {
                return Err(TenantError::ValidationField {
                    field: "seats".to_string(),
                    message: "seats must be >= 0, or -1 for unlimited".to_string(),
                });
            }
        }
        validate_quota_field(patch.storage_gb, "storage_gb")?;
        validate_quota_field(patch.requests_per_minute, "requests_per_minute")?;
        validate_quota_field(patch.retention_days, "retention_days")?;
        validate_quota_field(patch.departments, "departments")?;
        validate_quota_field(patch.roles, "roles")?;
        validate_quota_field(patch.projects, "projects")?;

        Ok(self
            .tenants
            .update_with(
                id,
                Box::new(move |t| {
                    let q = &mut t.quotas;
                    merge_field(&mut q.seats, patch.seats);
                    merge_field(&mut q.storage_gb, patch.storage_gb);
                    merge_field(&mut q.requests_per_minute, patch.requests_per_minute);
                    merge_field(&mut q.retention_days, patch.retention_days);
                    merge_field(&mut q.departments, patch.departments);
                    merge_field(&mut q.roles, patch.roles);
                    merge_field(&mut q.projects, patch.projects);
                }),
            )
            .await?)
    }

    /// Merge a security patch. Wholesale list replacement applies before
    /// the individual add/remove operations; the password policy is not
    /// reachable from here. The merge itself runs inside the store's
    /// atomic update.
    pub async fn update_security(
        &self,
        id: TenantId,
        patch: SecurityPatch,
    ) -> Result<Tenant, TenantError> {
        let allow_replace = match patch.ip_allowlist {
            Some(list) => Some(normalize_ip_set(list.into_iter())?),
            None => None,
        };
        let allow_add = normalize_ip_set(patch.ip_allowlist_add.into_iter())?;
        let allow_remove: Vec<String> = patch
            .ip_allowlist_remove
            .iter()
            .map(|ip| ip.trim().to_string())
            .collect();

        let deny_replace = match patch.ip_denylist {
            Some(list) => Some(normalize_ip_set(list.into_iter())?),
            None => None,
        };
        let deny_add = normalize_ip_set(patch.ip_denylist_add.into_iter())?;
        let deny_remove: Vec<String> = patch
            .ip_denylist_remove
            .iter()
            .map(|ip| ip.trim().to_string())
            .collect();

        Ok(self
            .tenants
            .update_with(
                id,
                Box::new(move |t| {
                    let s = &mut t.security;
                    if let Some(v) = patch.mfa_required {
                        s.mfa_required = v;
                    }
                    if let Some(v) = patch.sso_enabled {
                        s.sso_enabled = v;
                    }
                    if let Some(v) = patch.audit_enabled {
                        s.audit_enabled = v;
                    }

                    if let Some(list) = allow_replace {
                        s.ip_allowlist = list;
                    }
                    s.ip_allowlist.extend(allow_add);
                    for ip in &allow_remove {
                        s.ip_allowlist.remove(ip);
                    }

                    if let Some(list) = deny_replace {
                        s.ip_denylist = list;
                    }
                    s.ip_denylist.extend(deny_add);
                    for ip in &deny_remove {
                        s.ip_denylist.remove(ip);
                    }
                }),
            )
            .await?)
    }

    /// Replace the tenant's password policy wholesale.
    pub async fn set_password_policy(
        &self,
        id: TenantId,
        policy: PasswordPolicy,
    ) -> Result<Tenant, TenantError> {
        let updated = self
            .tenants
            .update_with(
                id,
                Box::new(move |t| {
                    t.security.password_policy = policy;
                }),
            )
            .await?;

        tracing::info!(
            target: "audit",
            event = "tenant_password_policy_changed",
            tenant_id = %id,
        );

        Ok(updated)
    }

    /// Register an inbound-ingestion address. Idempotent, and applied
    /// as an atomic set insert so concurrent adds both land.
    pub async fn add_inbound_email(
        &self,
        id: TenantId,
        email: &str,
    ) -> Result<Tenant, TenantError> {
        let normalized = email.trim().to_lowercase();
        if !is_valid_email(&normalized) {
            return Err(TenantError::ValidationField {
                field: "email".to_string(),
                message: "Invalid email address".to_string(),
            });
        }

        Ok(self
            .tenants
            .update_with(
                id,
                Box::new(move |t| {
                    t.inbound_emails.insert(normalized);
                }),
            )
            .await?)
    }

    /// Remove an inbound-ingestion address. Removing an absent address
    /// succeeds.
    pub async fn remove_inbound_email(
        &self,
        id: TenantId,
        email: &str,
    ) -> Result<Tenant, TenantError> {
        let normalized = email.trim().to_lowercase();
        Ok(self
            .tenants
            .update_with(
                id,
                Box::new(move |t| {
                    t.inbound_emails.remove(&normalized);
                }),
            )
            .await?)
    }
}

fn validate_quota_field(patch: Option<i64>, field: &str) -> Result<(), TenantError> {
    if let Some(value) = patch {
        if value < 0 {
            return Err(TenantError::ValidationField {
                field: field.to_string(),
                message: format!("{field} must be >= 0"),
            });
        }
    }
    Ok(())
}

fn merge_field(current: &mut i64, patch: Option<i64>) {
    if let Some(value) = patch {
        *current = value;
    }
}

fn normalize_ip(ip: &str) -> Result<String, TenantError> {
    let trimmed = ip.trim();
    if trimmed.is_empty() {
        return Err(TenantError::Validation(
            "IP list entries cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn normalize_ip_set(
    entries: impl Iterator<Item = String>,
) -> Result<std::collections::BTreeSet<String>, TenantError> {
    entries.map(|ip| normalize_ip(&ip)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use orvio_store::{InMemoryTenantStore, PrimaryContact, SecurityPolicy};
    use std::collections::BTreeSet;

    async fn seeded(status: TenantStatus) -> (LifecycleService, Arc<InMemoryTenantStore>, Tenant) {
        let store = InMemoryTenantStore::shared();
        let now = Utc::now();
        let tenant = store
            .create(Tenant {
                id: TenantId::new(),
                name: "Acme".to_string(),
                slug: "acme".to_string(),
                status,
                region: "us-east-1".to_string(),
                contact: PrimaryContact {
                    name: "John".to_string(),
                    email: "john@acme.com".to_string(),
                    ..Default::default()
                },
                features: BTreeSet::new(),
                modules: BTreeSet::new(),
                quotas: TenantQuotas::default(),
                security: SecurityPolicy::default(),
                inbound_emails: BTreeSet::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        (LifecycleService::new(store.clone()), store, tenant)
    }

    #[tokio::test]
    async fn legal_transitions_apply() {
        let (svc, _, tenant) = seeded(TenantStatus::Trial).await;

        let t = svc
            .update_status(tenant.id, TenantStatus::Active)
            .await
            .unwrap();
        assert_eq!(t.status, TenantStatus::Active);

        let t = svc
            .update_status(tenant.id, TenantStatus::Suspended)
            .await
            .unwrap();
        assert_eq!(t.status, TenantStatus::Suspended);

        let t = svc
            .update_status(tenant.id, TenantStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(t.status, TenantStatus::Inactive);
    }

    #[tokio::test]
    async fn same_status_is_a_noop_success() {
        let (svc, _, tenant) = seeded(TenantStatus::Trial).await;
        let t = svc
            .update_status(tenant.id, TenantStatus::Trial)
            .await
            .unwrap();
        assert_eq!(t.status, TenantStatus::Trial);
    }

    #[tokio::test]
    async fn illegal_transitions_are_rejected() {
        let (svc, _, tenant) = seeded(TenantStatus::Trial).await;
        let err = svc
            .update_status(tenant.id, TenantStatus::Suspended)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TenantError::InvalidTransition {
                from: TenantStatus::Trial,
                to: TenantStatus::Suspended,
            }
        ));
    }

    #[tokio::test]
    async fn inactive_is_terminal_for_update_status() {
        let (svc, _, tenant) = seeded(TenantStatus::Inactive).await;

        for target in [
            TenantStatus::Trial,
            TenantStatus::Active,
            TenantStatus::Suspended,
        ] {
            let err = svc.update_status(tenant.id, target).await.unwrap_err();
            assert!(matches!(err, TenantError::InvalidTransition { .. }));
        }
    }

    #[tokio::test]
    async fn reactivate_matrix() {
        let (svc, _, tenant) = seeded(TenantStatus::Inactive).await;
        let t = svc.reactivate(tenant.id).await.unwrap();
        assert_eq!(t.status, TenantStatus::Active);

        // Already active: no-op.
        let t = svc.reactivate(tenant.id).await.unwrap();
        assert_eq!(t.status, TenantStatus::Active);

        let (svc, _, tenant) = seeded(TenantStatus::Suspended).await;
        let t = svc.reactivate(tenant.id).await.unwrap();
        assert_eq!(t.status, TenantStatus::Active);

        let (svc, _, tenant) = seeded(TenantStatus::Trial).await;
        let err = svc.reactivate(tenant.id).await.unwrap_err();
        assert!(matches!(err, TenantError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn concurrent_status_change_is_a_conflict() {
        let (svc, store, tenant) = seeded(TenantStatus::Trial).await;

        // Another writer moves the tenant between guard and CAS. The
        // service re-reads per call, so emulate the race at the store.
        store
            .update_status(tenant.id, TenantStatus::Trial, TenantStatus::Active)
            .await
            .unwrap();
        let err = store
            .update_status(tenant.id, TenantStatus::Trial, TenantStatus::Inactive)
            .await
            .map_err(TenantError::from)
            .unwrap_err();
        assert!(matches!(err, TenantError::Conflict(_)));

        // Through the service a fresh read absorbs the stale
        // expectation and the transition table governs the move.
        let t = svc
            .update_status(tenant.id, TenantStatus::Trial)
            .await
            .unwrap();
        assert_eq!(t.status, TenantStatus::Trial);
    }

    #[tokio::test]
    async fn quota_patch_replaces_only_given_fields() {
        let (svc, _, tenant) = seeded(TenantStatus::Active).await;

        let t = svc
            .update_quotas(
                tenant.id,
                QuotaPatch {
                    seats: Some(100),
                    retention_days: Some(365),
                    ..QuotaPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(t.quotas.seats, 100);
        assert_eq!(t.quotas.retention_days, 365);
        assert_eq!(t.quotas.storage_gb, TenantQuotas::default().storage_gb);
    }

    #[tokio::test]
    async fn unlimited_seats_sentinel() {
        let (svc, _, tenant) = seeded(TenantStatus::Active).await;

        let t = svc
            .update_quotas(
                tenant.id,
                QuotaPatch {
                    seats: Some(UNLIMITED_SEATS),
                    ..QuotaPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(t.quotas.seats, UNLIMITED_SEATS);

        let err = svc
            .update_quotas(
                tenant.id,
                QuotaPatch {
                    seats: Some(-2),
                    ..QuotaPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TenantError::ValidationField { .. }));

        // The sentinel is seats-only.
        let err = svc
            .update_quotas(
                tenant.id,
                QuotaPatch {
                    storage_gb: Some(-1),
                    ..QuotaPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TenantError::ValidationField { .. }));
    }

    #[tokio::test]
    async fn security_merge_matrix() {
        let (svc, _, tenant) = seeded(TenantStatus::Active).await;

        // Flags merge independently.
        let t = svc
            .update_security(
                tenant.id,
                SecurityPatch {
                    mfa_required: Some(true),
                    ..SecurityPatch::default()
                },
            )
            .await
            .unwrap();
        assert!(t.security.mfa_required);
        assert!(!t.security.sso_enabled);

        // Wholesale replace, then individual add/remove on the result.
        let t = svc
            .update_security(
                tenant.id,
                SecurityPatch {
                    ip_allowlist: Some(
                        ["10.0.0.1".to_string(), "10.0.0.2".to_string()]
                            .into_iter()
                            .collect(),
                    ),
                    ip_allowlist_add: vec!["10.0.0.3".to_string()],
                    ip_allowlist_remove: vec!["10.0.0.1".to_string()],
                    ..SecurityPatch::default()
                },
            )
            .await
            .unwrap();
        let allow: Vec<&str> = t.security.ip_allowlist.iter().map(String::as_str).collect();
        assert_eq!(allow, vec!["10.0.0.2", "10.0.0.3"]);

        // Add/remove without replacement works against current state.
        let t = svc
            .update_security(
                tenant.id,
                SecurityPatch {
                    ip_denylist_add: vec!["192.0.2.1".to_string()],
                    ..SecurityPatch::default()
                },
            )
            .await
            .unwrap();
        assert!(t.security.ip_denylist.contains("192.0.2.1"));
        // Untouched flag survives the later patches.
        assert!(t.security.mfa_required);
    }

    #[tokio::test]
    async fn password_policy_is_not_reachable_via_security_patch() {
        let (svc, _, tenant) = seeded(TenantStatus::Active).await;

        let t = svc
            .update_security(
                tenant.id,
                SecurityPatch {
                    mfa_required: Some(true),
                    ..SecurityPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(t.security.password_policy, PasswordPolicy::default());

        let t = svc
            .set_password_policy(
                tenant.id,
                PasswordPolicy {
                    min_length: 14,
                    require_uppercase: true,
                    require_digit: true,
                    require_symbol: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(t.security.password_policy.min_length, 14);
        // The dedicated operation does not disturb the rest.
        assert!(t.security.mfa_required);
    }

    #[tokio::test]
    async fn inbound_email_add_is_idempotent_and_normalizing() {
        let (svc, _, tenant) = seeded(TenantStatus::Active).await;

        let t = svc
            .add_inbound_email(tenant.id, "Intake@Acme.COM")
            .await
            .unwrap();
        assert!(t.inbound_emails.contains("intake@acme.com"));

        let t = svc
            .add_inbound_email(tenant.id, "intake@acme.com")
            .await
            .unwrap();
        assert_eq!(t.inbound_emails.len(), 1);

        let err = svc
            .add_inbound_email(tenant.id, "not-an-email")
            .await
            .unwrap_err();
        assert!(matches!(err, TenantError::ValidationField { .. }));
    }

    #[tokio::test]
    async fn concurrent_inbound_email_adds_both_survive() {
        let (svc, _, tenant) = seeded(TenantStatus::Active).await;
        let svc = Arc::new(svc);

        // Each add is a single atomic set insert at the store, so
        // neither writer can overwrite the other with a stale snapshot.
        let first = tokio::spawn({
            let svc = svc.clone();
            async move { svc.add_inbound_email(tenant.id, "a@acme.com").await }
        });
        let second = tokio::spawn({
            let svc = svc.clone();
            async move { svc.add_inbound_email(tenant.id, "b@acme.com").await }
        });
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let t = svc.get(tenant.id).await.unwrap();
        assert!(t.inbound_emails.contains("a@acme.com"));
        assert!(t.inbound_emails.contains("b@acme.com"));
    }

    #[tokio::test]
    async fn inbound_email_remove_is_idempotent() {
        let (svc, _, tenant) = seeded(TenantStatus::Active).await;
        svc.add_inbound_email(tenant.id, "intake@acme.com")
            .await
            .unwrap();

        let t = svc
            .remove_inbound_email(tenant.id, "INTAKE@acme.com")
            .await
            .unwrap();
        assert!(t.inbound_emails.is_empty());

        // Removing an absent address still succeeds.
        assert!(svc
            .remove_inbound_email(tenant.id, "intake@acme.com")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn unknown_tenant_is_not_found() {
        let (svc, _, _) = seeded(TenantStatus::Active).await;
        let err = svc.get(TenantId::new()).await.unwrap_err();
        assert!(matches!(err, TenantError::NotFound(_)));
    }
}
