//! Route table for the tenant lifecycle API.
//!
//! Every route here requires a session; compose behind the resolver
//! middleware from `orvio-api-auth`.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers;
use crate::state::TenantsState;

pub fn tenants_router() -> Router<TenantsState> {
    Router::new()
        .route(
            "/tenants",
            post(handlers::provisioning::create_tenant).get(handlers::read::list_tenants),
        )
        .route("/tenants/:id", get(handlers::read::get_tenant))
        .route(
            "/tenants/:id/status",
            patch(handlers::lifecycle::update_status),
        )
        .route(
            "/tenants/:id/reactivate",
            post(handlers::lifecycle::reactivate),
        )
        .route(
            "/tenants/:id/quotas",
            patch(handlers::policy::update_quotas),
        )
        .route(
            "/tenants/:id/security",
            patch(handlers::policy::update_security),
        )
        .route(
            "/tenants/:id/security/password-policy",
            put(handlers::policy::set_password_policy),
        )
        .route(
            "/tenants/:id/inbound-emails",
            post(handlers::policy::add_inbound_email),
        )
        .route(
            "/tenants/:id/inbound-emails/:email",
            delete(handlers::policy::remove_inbound_email),
        )
}
