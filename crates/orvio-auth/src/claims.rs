//! Session token claims.
//!
//! The claims bundle is a signed, time-bounded assertion of identity:
//! subject, email, role, and (for tenant-scoped principals) the tenant
//! the token is pinned to. Claims are immutable for the life of the
//! token; role or status changes take effect on the next issued token.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orvio_core::{Role, TenantId};

/// Default interactive session lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// Claims carried by an orvio session token.
///
/// # Example
///
/// ```
/// use orvio_auth::Claims;
/// use orvio_core::{Role, TenantId};
/// use uuid::Uuid;
///
/// let claims = Claims::builder()
///     .subject(Uuid::new_v4())
///     .email("admin@acme.com")
///     .role(Role::TenantAdmin)
///     .tenant_id(TenantId::new())
///     .expires_in_secs(3600)
///     .build();
///
/// assert_eq!(claims.role, Role::TenantAdmin);
/// assert!(claims.tid.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject: the principal's ID.
    pub sub: Uuid,

    /// The principal's email at issue time.
    pub email: String,

    /// The principal's role at issue time.
    pub role: Role,

    /// Tenant scope. Absent for super-admin tokens, present and fixed
    /// for tenant-scoped tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<Uuid>,

    /// Issuer.
    pub iss: String,

    /// Issued-at as Unix timestamp.
    pub iat: i64,

    /// Expiry as Unix timestamp.
    pub exp: i64,

    /// Unique token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Create a new builder.
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::default()
    }

    /// Check whether the embedded expiry is in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Tenant scope as a typed ID, if present.
    #[must_use]
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tid.map(TenantId::from_uuid)
    }
}

/// Builder for [`Claims`].
#[derive(Debug, Default)]
pub struct ClaimsBuilder {
    sub: Option<Uuid>,
    email: Option<String>,
    role: Option<Role>,
    tid: Option<Uuid>,
    iss: Option<String>,
    iat: Option<i64>,
    exp: Option<i64>,
    jti: Option<Uuid>,
}

impl ClaimsBuilder {
    /// Set the subject (principal ID).
    #[must_use]
    pub fn subject(mut self, sub: Uuid) -> Self {
        self.sub = Some(sub);
        self
    }

    /// Set the principal's email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the principal's role.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Pin the token to a tenant.
    #[must_use]
    pub fn tenant_id(mut self, tid: TenantId) -> Self {
        self.tid = Some(*tid.as_uuid());
        self
    }

    /// Pin the token to a tenant given as a raw UUID.
    #[must_use]
    pub fn tenant_uuid(mut self, tid: Uuid) -> Self {
        self.tid = Some(tid);
        self
    }

    /// Set the issuer.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Set the issued-at timestamp.
    #[must_use]
    pub fn issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set the expiry as an absolute Unix timestamp.
    #[must_use]
    pub fn expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set the expiry as seconds from now.
    #[must_use]
    pub fn expires_in_secs(mut self, secs: i64) -> Self {
        self.exp = Some(Utc::now().timestamp() + secs);
        self
    }

    /// Set the token ID.
    #[must_use]
    pub fn jwt_id(mut self, jti: Uuid) -> Self {
        self.jti = Some(jti);
        self
    }

    /// Build the claims.
    ///
    /// # Defaults
    ///
    /// - `sub`: nil UUID if not set (callers always set it)
    /// - `role`: `TenantUser` if not set
    /// - `iss`: `"orvio"`
    /// - `iat`: now
    /// - `exp`: [`DEFAULT_TOKEN_TTL_SECS`] from now
    /// - `jti`: new UUID v4
    #[must_use]
    pub fn build(self) -> Claims {
        let now = Utc::now().timestamp();

        Claims {
            sub: self.sub.unwrap_or_else(Uuid::nil),
            email: self.email.unwrap_or_default(),
            role: self.role.unwrap_or(Role::TenantUser),
            tid: self.tid,
            iss: self.iss.unwrap_or_else(|| "orvio".to_string()),
            iat: self.iat.unwrap_or(now),
            exp: self.exp.unwrap_or(now + DEFAULT_TOKEN_TTL_SECS),
            jti: self.jti.unwrap_or_else(Uuid::new_v4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let sub = Uuid::new_v4();
        let claims = Claims::builder()
            .subject(sub)
            .email("root@orvio.io")
            .role(Role::SuperAdmin)
            .build();

        assert_eq!(claims.sub, sub);
        assert_eq!(claims.email, "root@orvio.io");
        assert_eq!(claims.role, Role::SuperAdmin);
        assert_eq!(claims.iss, "orvio");
        assert!(claims.tid.is_none());
        assert!(!claims.jti.is_nil());
    }

    #[test]
    fn builder_with_tenant() {
        let tenant_id = TenantId::new();
        let claims = Claims::builder()
            .subject(Uuid::new_v4())
            .role(Role::TenantAdmin)
            .tenant_id(tenant_id)
            .build();

        assert_eq!(claims.tenant_id(), Some(tenant_id));
    }

    #[test]
    fn default_expiry_is_24_hours() {
        let before = Utc::now().timestamp();
        let claims = Claims::builder().subject(Uuid::new_v4()).build();
        let after = Utc::now().timestamp();

        assert!(claims.exp >= before + DEFAULT_TOKEN_TTL_SECS);
        assert!(claims.exp <= after + DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    fn expiration_check() {
        let live = Claims::builder()
            .subject(Uuid::new_v4())
            .expires_in_secs(3600)
            .build();
        assert!(!live.is_expired());

        let stale = Claims::builder()
            .subject(Uuid::new_v4())
            .expiration(Utc::now().timestamp() - 3600)
            .build();
        assert!(stale.is_expired());
    }

    #[test]
    fn super_admin_token_omits_tid_on_the_wire() {
        let claims = Claims::builder()
            .subject(Uuid::new_v4())
            .role(Role::SuperAdmin)
            .build();

        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("\"tid\""));
    }

    #[test]
    fn serde_roundtrip() {
        let claims = Claims::builder()
            .subject(Uuid::new_v4())
            .email("jane@acme.com")
            .role(Role::TenantAdmin)
            .tenant_id(TenantId::new())
            .expires_in_secs(60)
            .build();

        let json = serde_json::to_string(&claims).unwrap();
        let decoded: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, claims);
    }
}
