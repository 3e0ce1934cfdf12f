//! Shared state for the authentication API routers.

use std::sync::Arc;

use orvio_auth::{PasswordHasher, TokenKeys, ValidationConfig};
use orvio_store::{InviteStore, PrincipalStore, TenantStore};

use crate::services::{AuthService, PrincipalService};

/// Issuer written into and expected from every session token.
pub const TOKEN_ISSUER: &str = "orvio";

/// State shared by the auth handlers and the resolver middleware.
#[derive(Clone)]
pub struct AuthState {
    pub principals: Arc<dyn PrincipalStore>,
    pub tenants: Arc<dyn TenantStore>,
    pub invites: Arc<dyn InviteStore>,
    pub auth_service: Arc<AuthService>,
    pub principal_service: Arc<PrincipalService>,
    pub token_keys: Arc<TokenKeys>,
    pub validation: ValidationConfig,
}

impl AuthState {
    /// Wire up the services over the given stores.
    #[must_use]
    pub fn new(
        principals: Arc<dyn PrincipalStore>,
        tenants: Arc<dyn TenantStore>,
        invites: Arc<dyn InviteStore>,
        token_keys: TokenKeys,
        hasher: PasswordHasher,
        token_ttl_secs: i64,
    ) -> Self {
        let token_keys = Arc::new(token_keys);

        let auth_service = Arc::new(AuthService::new(
            principals.clone(),
            invites.clone(),
            hasher.clone(),
            token_keys.clone(),
            token_ttl_secs,
        ));
        let principal_service = Arc::new(PrincipalService::new(principals.clone(), hasher));

        Self {
            principals,
            tenants,
            invites,
            auth_service,
            principal_service,
            token_keys,
            validation: ValidationConfig::default().issuer(TOKEN_ISSUER),
        }
    }
}
