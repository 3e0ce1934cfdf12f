//! Route tables for the authentication API.
//!
//! The public router must NOT sit behind the resolver middleware; the
//! session and admin routers must. Composition happens in the binary.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers;
use crate::state::AuthState;

/// Routes reachable without a session.
///
/// `/login` is an alias kept for callers that predate the `/auth`
/// prefix; both paths hit the same handler.
pub fn auth_public_router() -> Router<AuthState> {
    Router::new()
        .route("/login", post(handlers::login::login))
        .route("/auth/login", post(handlers::login::login))
        .route(
            "/auth/invites/accept",
            post(handlers::invites::accept_invite),
        )
}

/// Routes for the authenticated caller's own session.
pub fn auth_session_router() -> Router<AuthState> {
    Router::new()
        .route("/auth/me", get(handlers::me::me))
        .route("/auth/password", post(handlers::password::change_password))
}

/// Principal administration, super-admin only.
pub fn principal_admin_router() -> Router<AuthState> {
    Router::new()
        .route("/admin/principals", post(handlers::admin::create_principal))
        .route(
            "/admin/principals/:id/status",
            patch(handlers::admin::update_principal_status),
        )
}
