//! First-run provisioning of the initial super admin.

use std::sync::Arc;

use thiserror::Error;

use orvio_auth::{AuthError, PasswordHasher};
use orvio_core::Role;
use orvio_store::{NewPrincipal, PrincipalStore, StoreError};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Hash(#[from] AuthError),
}

/// Ensure the bootstrap super admin exists. Idempotent: an existing
/// principal with the email is left untouched, so a restart never
/// resets a rotated password.
pub async fn bootstrap_admin(
    principals: &Arc<dyn PrincipalStore>,
    hasher: &PasswordHasher,
    email: &str,
    password: &str,
) -> Result<(), BootstrapError> {
    if principals.find_by_email(email).await?.is_some() {
        tracing::debug!(email = %email.to_lowercase(), "Bootstrap admin already present");
        return Ok(());
    }

    let password_hash = hasher.hash(password)?;
    let principal = principals
        .create(NewPrincipal {
            email: email.to_string(),
            password_hash: Some(password_hash),
            role: Role::SuperAdmin,
            tenant_id: None,
        })
        .await?;

    tracing::info!(
        target: "audit",
        event = "bootstrap_admin_created",
        principal_id = %principal.id,
    );

    Ok(())
}
