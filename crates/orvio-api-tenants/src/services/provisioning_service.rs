//! Tenant provisioning: tenant row plus exactly one owner principal.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Duration, Utc};

use orvio_auth::{
    generate_invite_code, generate_password, hash_invite_code, PasswordHasher, INVITE_TTL_DAYS,
};
use orvio_core::{InviteId, Role, TenantId};
use orvio_store::{
    InviteStore, NewPrincipal, OwnerInvite, PrimaryContact, PrincipalStore, SecurityPolicy,
    Tenant, TenantQuotas, TenantStatus, TenantStore,
};

use crate::error::TenantError;
use crate::models::{CreateTenantRequest, OwnerCredentials, ProvisioningMode};
use crate::services::slug_service::{generate_slug, validate_slug, MAX_SLUG_LEN};

/// How many numeric suffixes to try when a generated slug collides.
const SLUG_SUFFIX_ATTEMPTS: u32 = 50;

/// Creates tenants together with their owner principal.
pub struct ProvisioningService {
    tenants: Arc<dyn TenantStore>,
    principals: Arc<dyn PrincipalStore>,
    invites: Arc<dyn InviteStore>,
    hasher: PasswordHasher,
    default_status: TenantStatus,
}

impl ProvisioningService {
    pub fn new(
        tenants: Arc<dyn TenantStore>,
        principals: Arc<dyn PrincipalStore>,
        invites: Arc<dyn InviteStore>,
        hasher: PasswordHasher,
        default_status: TenantStatus,
    ) -> Self {
        Self {
            tenants,
            principals,
            invites,
            hasher,
            default_status,
        }
    }

    /// Create a tenant and provision its owner.
    ///
    /// The two writes are not atomic; when owner provisioning fails
    /// after the tenant row persisted, the tenant is deleted again and
    /// the inconsistency window logged for reconciliation.
    pub async fn create(
        &self,
        req: CreateTenantRequest,
    ) -> Result<(Tenant, OwnerCredentials), TenantError> {
        req.validate()?;

        let slug = match &req.slug {
            Some(slug) => {
                validate_slug(slug)?;
                if self.tenants.find_by_slug(slug).await?.is_some() {
                    return Err(TenantError::DuplicateSlug(slug.clone()));
                }
                slug.clone()
            }
            None => self.unique_slug(&req.name).await?,
        };

        let owner_email = req
            .owner_email
            .as_deref()
            .unwrap_or(&req.contact.email)
            .to_lowercase();

        // The owner email must be free before the tenant row is written;
        // the late re-check below still guards the race.
        if self.principals.find_by_email(&owner_email).await?.is_some() {
            return Err(TenantError::DuplicateEmail);
        }

        let now = Utc::now();
        let tenant = self
            .tenants
            .create(Tenant {
                id: TenantId::new(),
                name: req.name.trim().to_string(),
                slug,
                status: self.default_status,
                region: req.region.trim().to_string(),
                contact: PrimaryContact {
                    name: req.contact.name,
                    email: req.contact.email.to_lowercase(),
                    phone: req.contact.phone,
                    timezone: req.contact.timezone,
                    address: req.contact.address,
                },
                features: req.features,
                modules: req.modules,
                quotas: TenantQuotas::default(),
                security: SecurityPolicy::default(),
                inbound_emails: BTreeSet::new(),
                created_at: now,
                updated_at: now,
            })
            .await?;

        match self
            .provision_owner(&tenant, &owner_email, req.provisioning)
            .await
        {
            Ok(owner) => {
                tracing::info!(
                    target: "audit",
                    event = "tenant_created",
                    tenant_id = %tenant.id,
                    slug = %tenant.slug,
                    status = %tenant.status,
                );
                Ok((tenant, owner))
            }
            Err(err) => {
                // Compensating delete; a failure here leaves an ownerless
                // tenant row that reconciliation has to pick up.
                if let Err(cleanup) = self.tenants.delete(tenant.id).await {
                    tracing::error!(
                        tenant_id = %tenant.id,
                        error = %cleanup,
                        "Owner provisioning failed AND compensating tenant delete failed",
                    );
                } else {
                    tracing::error!(
                        tenant_id = %tenant.id,
                        error = %err,
                        "Owner provisioning failed; tenant creation rolled back",
                    );
                }
                Err(err)
            }
        }
    }

    async fn provision_owner(
        &self,
        tenant: &Tenant,
        owner_email: &str,
        mode: ProvisioningMode,
    ) -> Result<OwnerCredentials, TenantError> {
        match mode {
            ProvisioningMode::Invite => {
                let principal = self
                    .principals
                    .create(NewPrincipal {
                        email: owner_email.to_string(),
                        password_hash: None,
                        role: Role::TenantAdmin,
                        tenant_id: Some(tenant.id),
                    })
                    .await?;

                let code = generate_invite_code();
                let now = Utc::now();
                let expires_at = now + Duration::days(INVITE_TTL_DAYS);
                let invite = self
                    .invites
                    .create(OwnerInvite {
                        id: InviteId::new(),
                        principal_id: principal.id,
                        tenant_id: tenant.id,
                        code_hash: hash_invite_code(&code),
                        expires_at,
                        accepted_at: None,
                        created_at: now,
                    })
                    .await;

                if let Err(err) = invite {
                    // Unwind the principal too; the caller then deletes
                    // the tenant.
                    let _ = self.principals.delete(principal.id).await;
                    return Err(err.into());
                }

                Ok(OwnerCredentials::OwnerInvite {
                    principal_id: *principal.id.as_uuid(),
                    email: principal.email,
                    code,
                    expires_at,
                })
            }
            ProvisioningMode::Password => {
                let password = generate_password();
                let password_hash = self.hasher.hash(&password)?;

                let principal = self
                    .principals
                    .create(NewPrincipal {
                        email: owner_email.to_string(),
                        password_hash: Some(password_hash),
                        role: Role::TenantAdmin,
                        tenant_id: Some(tenant.id),
                    })
                    .await?;

                Ok(OwnerCredentials::Password {
                    principal_id: *principal.id.as_uuid(),
                    email: principal.email,
                    password,
                })
            }
        }
    }

    async fn unique_slug(&self, name: &str) -> Result<String, TenantError> {
        let base = generate_slug(name);
        if self.tenants.find_by_slug(&base).await?.is_none() {
            return Ok(base);
        }

        for n in 2..=SLUG_SUFFIX_ATTEMPTS {
            let suffix = format!("-{n}");
            let mut candidate = base.clone();
            candidate.truncate(MAX_SLUG_LEN - suffix.len());
            while candidate.ends_with('-') {
                candidate.pop();
            }
            candidate.push_str(&suffix);

            if self.tenants.find_by_slug(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(TenantError::Conflict(format!(
            "Could not find a free slug for '{base}'"
        )))
    }
}
