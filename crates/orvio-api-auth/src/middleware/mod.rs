//! Auth context resolver middleware.
//!
//! Runs on every protected route. Verifies the bearer token offline,
//! then re-checks live state: the principal must still exist and be
//! active, the token's tenant pin must match the stored assignment, and
//! a pinned tenant must still be in an access-granting status. Claims
//! themselves are immutable for the token's life; the live checks exist
//! so suspension takes effect before expiry.
//!
//! Every failure mode collapses to the same 401 so callers cannot probe
//! which check failed.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use orvio_auth::decode_token_with_config;
use orvio_core::{authorize, PrincipalId, Role, TenantId};

use crate::error::ApiAuthError;
use crate::state::AuthState;

/// The resolved identity of the caller, inserted into request
/// extensions by [`auth_middleware`].
///
/// Role and email come from the verified claims; the middleware has
/// already confirmed the principal is live.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub tenant_id: Option<Uuid>,
}

impl Principal {
    /// Fail-closed role check: errors unless the caller's role is in
    /// the allowed set.
    pub fn require_any_role(&self, allowed: &[Role]) -> Result<(), ApiAuthError> {
        if authorize(self.role, allowed) {
            Ok(())
        } else {
            Err(ApiAuthError::Forbidden)
        }
    }

    /// Tenant scope as a typed ID, if any.
    #[must_use]
    pub fn tenant(&self) -> Option<TenantId> {
        self.tenant_id.map(TenantId::from_uuid)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiAuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| session_rejected())
    }
}

fn session_rejected() -> ApiAuthError {
    ApiAuthError::Unauthorized("Invalid or expired session".to_string())
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(parts: &axum::http::HeaderMap) -> Option<&str> {
    let value = parts.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Resolver middleware for protected routes.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiAuthError> {
    let token = bearer_token(req.headers()).ok_or_else(session_rejected)?;

    let claims = decode_token_with_config(token, &state.token_keys, &state.validation)
        .map_err(|_| session_rejected())?;

    let principal = state
        .principals
        .find_by_id(PrincipalId::from_uuid(claims.sub))
        .await?
        .ok_or_else(session_rejected)?;

    if !principal.is_active() {
        return Err(session_rejected());
    }

    // The token's tenant pin must match the live assignment. A reassigned
    // or unscoped principal invalidates older tokens here.
    if claims.tenant_id() != principal.tenant_id {
        return Err(session_rejected());
    }

    if let Some(tenant_id) = principal.tenant_id {
        let tenant = state
            .tenants
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(session_rejected)?;

        if !tenant.status.allows_access() {
            return Err(session_rejected());
        }
    }

    req.extensions_mut().insert(Principal {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
        tenant_id: claims.tid,
    });

    Ok(next.run(req).await)
}
