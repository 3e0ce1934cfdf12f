//! Admin principal management: creation and suspension.

use std::sync::Arc;

use orvio_auth::{generate_password, PasswordHasher};
use orvio_core::{PrincipalId, Role, TenantId};
use orvio_store::{AdminPrincipal, NewPrincipal, PrincipalStatus, PrincipalStore};

use crate::error::ApiAuthError;
use crate::models::validate_password_baseline;

/// Creation and lifecycle of admin principals.
pub struct PrincipalService {
    principals: Arc<dyn PrincipalStore>,
    hasher: PasswordHasher,
}

impl PrincipalService {
    pub fn new(principals: Arc<dyn PrincipalStore>, hasher: PasswordHasher) -> Self {
        Self { principals, hasher }
    }

    /// Create a principal.
    ///
    /// Tenant-scoped roles require a tenant assignment and super admins
    /// must not carry one. When no password is supplied a random one is
    /// generated and returned; it is never shown again.
    pub async fn create(
        &self,
        email: &str,
        password: Option<&str>,
        role: Role,
        tenant_id: Option<TenantId>,
    ) -> Result<(AdminPrincipal, Option<String>), ApiAuthError> {
        match (role.is_tenant_scoped(), tenant_id) {
            (true, None) => {
                return Err(ApiAuthError::Validation(
                    "Tenant-scoped roles require a tenant_id".to_string(),
                ))
            }
            (false, Some(_)) => {
                return Err(ApiAuthError::Validation(
                    "Super admins cannot be assigned a tenant".to_string(),
                ))
            }
            _ => {}
        }

        let (plaintext, generated) = match password {
            Some(p) => {
                validate_password_baseline(p)?;
                (p.to_string(), None)
            }
            None => {
                let p = generate_password();
                (p.clone(), Some(p))
            }
        };
        let password_hash = self.hasher.hash(&plaintext)?;

        let principal = self
            .principals
            .create(NewPrincipal {
                email: email.to_string(),
                password_hash: Some(password_hash),
                role,
                tenant_id,
            })
            .await?;

        tracing::info!(
            target: "audit",
            event = "principal_created",
            principal_id = %principal.id,
            role = %principal.role,
        );

        Ok((principal, generated))
    }

    /// Suspend or reinstate a principal.
    ///
    /// A principal cannot change its own status, so the last active
    /// super admin cannot lock everyone out.
    pub async fn set_status(
        &self,
        acting: PrincipalId,
        target: PrincipalId,
        status: PrincipalStatus,
    ) -> Result<AdminPrincipal, ApiAuthError> {
        if acting == target {
            return Err(ApiAuthError::Validation(
                "Cannot change your own status".to_string(),
            ));
        }

        let updated = self.principals.update_status(target, status).await?;

        tracing::info!(
            target: "audit",
            event = "principal_status_changed",
            principal_id = %target,
            status = %status,
        );

        Ok(updated)
    }
}
