//! orvio authentication API
//!
//! The login/session workflow, the auth context resolver middleware,
//! and the principal administration surface.
//!
//! Routers:
//! - [`auth_public_router`](router::auth_public_router) - `/auth/login`,
//!   `/auth/invites/accept` (no bearer token required)
//! - [`auth_session_router`](router::auth_session_router) - `/auth/me`,
//!   `/auth/password` (behind the resolver middleware)
//! - [`principal_admin_router`](router::principal_admin_router) -
//!   `/admin/principals` (super-admin only)

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;
pub mod state;

pub use error::{ApiAuthError, ErrorResponse};
pub use middleware::{auth_middleware, Principal};
pub use router::{auth_public_router, auth_session_router, principal_admin_router};
pub use services::{AuthService, PrincipalService, RequestMeta};
pub use state::AuthState;
