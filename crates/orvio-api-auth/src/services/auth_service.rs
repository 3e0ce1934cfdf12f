//! Credential verification, session issuance, invite redemption, and
//! password changes.

use std::sync::Arc;

use chrono::Utc;

use orvio_auth::{
    encode_token, hash_invite_code, Claims, PasswordHasher, TokenKeys,
};
use orvio_core::PrincipalId;
use orvio_store::{AdminPrincipal, InviteStore, PrincipalStore};

use crate::error::ApiAuthError;
use crate::state::TOKEN_ISSUER;

/// Request metadata carried along for the audit trail only; it never
/// participates in the authorization decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestMeta<'a> {
    pub remote_ip: Option<&'a str>,
    pub user_agent: Option<&'a str>,
}

/// Login, invite acceptance, and password management.
pub struct AuthService {
    principals: Arc<dyn PrincipalStore>,
    invites: Arc<dyn InviteStore>,
    hasher: PasswordHasher,
    keys: Arc<TokenKeys>,
    token_ttl_secs: i64,
}

impl AuthService {
    pub fn new(
        principals: Arc<dyn PrincipalStore>,
        invites: Arc<dyn InviteStore>,
        hasher: PasswordHasher,
        keys: Arc<TokenKeys>,
        token_ttl_secs: i64,
    ) -> Self {
        Self {
            principals,
            invites,
            hasher,
            keys,
            token_ttl_secs,
        }
    }

    /// Session lifetime applied to issued tokens, in seconds.
    #[must_use]
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_secs
    }

    /// Verify credentials and issue a session token.
    ///
    /// Unknown email, pending invite (no password yet), and wrong
    /// password all produce the same `InvalidCredentials`. A suspended
    /// principal fails with `AccountSuspended` before the password is
    /// even looked at, so suspension holds regardless of password
    /// correctness.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        meta: RequestMeta<'_>,
    ) -> Result<(String, AdminPrincipal), ApiAuthError> {
        let ip = meta.remote_ip.unwrap_or("unknown");
        let user_agent = meta.user_agent.unwrap_or("unknown");

        let principal = match self.principals.find_by_email(email).await? {
            Some(p) => p,
            None => {
                tracing::info!(
                    target: "audit",
                    event = "login_failed",
                    email = %email.to_lowercase(),
                    ip,
                    user_agent,
                    reason = "unknown_email",
                );
                return Err(ApiAuthError::InvalidCredentials);
            }
        };

        if !principal.is_active() {
            tracing::info!(
                target: "audit",
                event = "login_failed",
                principal_id = %principal.id,
                ip,
                user_agent,
                reason = "suspended",
            );
            return Err(ApiAuthError::AccountSuspended);
        }

        let hash = principal
            .password_hash
            .as_deref()
            .ok_or(ApiAuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, hash)? {
            tracing::info!(
                target: "audit",
                event = "login_failed",
                principal_id = %principal.id,
                ip,
                user_agent,
                reason = "bad_password",
            );
            return Err(ApiAuthError::InvalidCredentials);
        }

        let token = self.issue_token(&principal)?;

        tracing::info!(
            target: "audit",
            event = "login_succeeded",
            principal_id = %principal.id,
            role = %principal.role,
            ip,
            user_agent,
        );

        Ok((token, principal))
    }

    /// Redeem an owner invite: set the password and issue a first
    /// session.
    ///
    /// Unknown, expired, and already-used codes are indistinguishable.
    pub async fn accept_invite(
        &self,
        code: &str,
        password: &str,
    ) -> Result<(String, AdminPrincipal), ApiAuthError> {
        let invite = self
            .invites
            .find_by_code_hash(&hash_invite_code(code))
            .await?
            .ok_or(ApiAuthError::InvalidInvite)?;

        if !invite.is_redeemable(Utc::now()) {
            return Err(ApiAuthError::InvalidInvite);
        }

        let principal = self
            .principals
            .find_by_id(invite.principal_id)
            .await?
            .filter(AdminPrincipal::is_active)
            .ok_or(ApiAuthError::InvalidInvite)?;

        let password_hash = self.hasher.hash(password)?;

        // Ordering: the invite is burned only after the password landed,
        // so a crash in between leaves the code redeemable rather than
        // the account locked out.
        let principal = self
            .principals
            .update_password(principal.id, password_hash)
            .await?;
        self.invites.mark_accepted(invite.id).await?;

        let token = self.issue_token(&principal)?;

        tracing::info!(
            target: "audit",
            event = "invite_accepted",
            principal_id = %principal.id,
            tenant_id = %invite.tenant_id,
        );

        Ok((token, principal))
    }

    /// Change the caller's own password after re-verifying the current
    /// one.
    pub async fn change_password(
        &self,
        principal_id: PrincipalId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiAuthError> {
        let principal = self
            .principals
            .find_by_id(principal_id)
            .await?
            .ok_or_else(|| ApiAuthError::NotFound("Principal not found".to_string()))?;

        let hash = principal
            .password_hash
            .as_deref()
            .ok_or(ApiAuthError::InvalidCredentials)?;

        if !self.hasher.verify(current_password, hash)? {
            return Err(ApiAuthError::InvalidCredentials);
        }

        let new_hash = self.hasher.hash(new_password)?;
        self.principals
            .update_password(principal_id, new_hash)
            .await?;

        tracing::info!(
            target: "audit",
            event = "password_changed",
            principal_id = %principal_id,
        );

        Ok(())
    }

    fn issue_token(&self, principal: &AdminPrincipal) -> Result<String, ApiAuthError> {
        let mut builder = Claims::builder()
            .subject(*principal.id.as_uuid())
            .email(principal.email.clone())
            .role(principal.role)
            .issuer(TOKEN_ISSUER)
            .expires_in_secs(self.token_ttl_secs);

        if let Some(tenant_id) = principal.tenant_id {
            builder = builder.tenant_id(tenant_id);
        }

        Ok(encode_token(&builder.build(), &self.keys)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orvio_auth::{decode_token, generate_invite_code};
    use orvio_core::{Role, TenantId};
    use orvio_store::{
        InMemoryInviteStore, InMemoryPrincipalStore, NewPrincipal, OwnerInvite, PrincipalStatus,
    };

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_params(4096, 1, 1).unwrap()
    }

    fn service(
        principals: Arc<InMemoryPrincipalStore>,
        invites: Arc<InMemoryInviteStore>,
    ) -> AuthService {
        AuthService::new(
            principals,
            invites,
            hasher(),
            Arc::new(TokenKeys::from_secret(b"test-secret-for-auth-service")),
            3600,
        )
    }

    async fn seed_principal(
        store: &InMemoryPrincipalStore,
        email: &str,
        password: &str,
    ) -> AdminPrincipal {
        store
            .create(NewPrincipal {
                email: email.to_string(),
                password_hash: Some(hasher().hash(password).unwrap()),
                role: Role::SuperAdmin,
                tenant_id: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn login_success_issues_decodable_token() {
        let principals = InMemoryPrincipalStore::shared();
        let svc = service(principals.clone(), InMemoryInviteStore::shared());
        let created = seed_principal(&principals, "root@orvio.io", "hunter2hunter2").await;

        let (token, principal) = svc
            .login("root@orvio.io", "hunter2hunter2", RequestMeta::default())
            .await
            .unwrap();
        assert_eq!(principal.id, created.id);

        let claims =
            decode_token(&token, &TokenKeys::from_secret(b"test-secret-for-auth-service"))
                .unwrap();
        assert_eq!(claims.sub, *created.id.as_uuid());
        assert_eq!(claims.role, Role::SuperAdmin);
        assert_eq!(claims.iss, "orvio");
        assert!(claims.tid.is_none());
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_identical() {
        let principals = InMemoryPrincipalStore::shared();
        let svc = service(principals.clone(), InMemoryInviteStore::shared());
        seed_principal(&principals, "root@orvio.io", "hunter2hunter2").await;

        let unknown = svc
            .login("ghost@orvio.io", "whatever1", RequestMeta::default())
            .await
            .unwrap_err();
        let wrong = svc
            .login("root@orvio.io", "not-the-password1", RequestMeta::default())
            .await
            .unwrap_err();

        assert!(matches!(unknown, ApiAuthError::InvalidCredentials));
        assert!(matches!(wrong, ApiAuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn suspension_wins_regardless_of_password() {
        let principals = InMemoryPrincipalStore::shared();
        let svc = service(principals.clone(), InMemoryInviteStore::shared());
        let created = seed_principal(&principals, "root@orvio.io", "hunter2hunter2").await;
        principals
            .update_status(created.id, PrincipalStatus::Suspended)
            .await
            .unwrap();

        let err = svc
            .login("root@orvio.io", "hunter2hunter2", RequestMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiAuthError::AccountSuspended));

        // The status check precedes password verification, so the wrong
        // password reports suspension too.
        let err = svc
            .login("root@orvio.io", "wrong1234", RequestMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiAuthError::AccountSuspended));

        // Reactivation restores normal logins.
        principals
            .update_status(created.id, PrincipalStatus::Active)
            .await
            .unwrap();
        assert!(svc
            .login("root@orvio.io", "hunter2hunter2", RequestMeta::default())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn pending_invite_principal_cannot_log_in() {
        let principals = InMemoryPrincipalStore::shared();
        let svc = service(principals.clone(), InMemoryInviteStore::shared());
        principals
            .create(NewPrincipal {
                email: "owner@acme.com".to_string(),
                password_hash: None,
                role: Role::TenantAdmin,
                tenant_id: Some(TenantId::new()),
            })
            .await
            .unwrap();

        let err = svc
            .login("owner@acme.com", "anything1", RequestMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiAuthError::InvalidCredentials));
    }

    async fn seed_invite(
        principals: &InMemoryPrincipalStore,
        invites: &InMemoryInviteStore,
    ) -> (String, AdminPrincipal) {
        let tenant_id = TenantId::new();
        let principal = principals
            .create(NewPrincipal {
                email: "owner@acme.com".to_string(),
                password_hash: None,
                role: Role::TenantAdmin,
                tenant_id: Some(tenant_id),
            })
            .await
            .unwrap();

        let code = generate_invite_code();
        let now = Utc::now();
        invites
            .create(OwnerInvite {
                id: orvio_core::InviteId::new(),
                principal_id: principal.id,
                tenant_id,
                code_hash: hash_invite_code(&code),
                expires_at: now + chrono::Duration::days(7),
                accepted_at: None,
                created_at: now,
            })
            .await
            .unwrap();

        (code, principal)
    }

    #[tokio::test]
    async fn invite_acceptance_sets_password_and_logs_in() {
        let principals = InMemoryPrincipalStore::shared();
        let invites = InMemoryInviteStore::shared();
        let svc = service(principals.clone(), invites.clone());
        let (code, seeded) = seed_invite(&principals, &invites).await;

        let (token, principal) = svc.accept_invite(&code, "chosen-pass1").await.unwrap();
        assert_eq!(principal.id, seeded.id);
        assert!(!token.is_empty());

        // The new password works for a normal login afterwards.
        assert!(svc
            .login("owner@acme.com", "chosen-pass1", RequestMeta::default())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn invite_is_single_use() {
        let principals = InMemoryPrincipalStore::shared();
        let invites = InMemoryInviteStore::shared();
        let svc = service(principals.clone(), invites.clone());
        let (code, _) = seed_invite(&principals, &invites).await;

        svc.accept_invite(&code, "chosen-pass1").await.unwrap();
        let err = svc.accept_invite(&code, "another-pass1").await.unwrap_err();
        assert!(matches!(err, ApiAuthError::InvalidInvite));
    }

    #[tokio::test]
    async fn unknown_and_expired_invites_are_identical() {
        let principals = InMemoryPrincipalStore::shared();
        let invites = InMemoryInviteStore::shared();
        let svc = service(principals.clone(), invites.clone());

        let unknown = svc
            .accept_invite("no-such-code", "chosen-pass1")
            .await
            .unwrap_err();

        let (code, _) = seed_invite(&principals, &invites).await;
        let stored = invites
            .find_by_code_hash(&hash_invite_code(&code))
            .await
            .unwrap()
            .unwrap();
        // Rewind the expiry.
        invites
            .create(OwnerInvite {
                expires_at: Utc::now() - chrono::Duration::hours(1),
                ..stored
            })
            .await
            .unwrap();

        let expired = svc
            .accept_invite(&code, "chosen-pass1")
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), expired.to_string());
    }

    #[tokio::test]
    async fn password_change_requires_current_password() {
        let principals = InMemoryPrincipalStore::shared();
        let svc = service(principals.clone(), InMemoryInviteStore::shared());
        let created = seed_principal(&principals, "root@orvio.io", "hunter2hunter2").await;

        let err = svc
            .change_password(created.id, "wrong-current1", "new-password1")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiAuthError::InvalidCredentials));

        svc.change_password(created.id, "hunter2hunter2", "new-password1")
            .await
            .unwrap();
        assert!(svc
            .login("root@orvio.io", "new-password1", RequestMeta::default())
            .await
            .is_ok());
        assert!(svc
            .login("root@orvio.io", "hunter2hunter2", RequestMeta::default())
            .await
            .is_err());
    }
}
