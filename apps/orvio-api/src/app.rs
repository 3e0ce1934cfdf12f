//! Router assembly.

use axum::{routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use orvio_api_auth::{
    auth_middleware, auth_public_router, auth_session_router, principal_admin_router, AuthState,
};
use orvio_api_tenants::{tenants_router, TenantsState};
use orvio_auth::{PasswordHasher, TokenKeys};
use orvio_store::{InMemoryInviteStore, InMemoryPrincipalStore, InMemoryTenantStore};

use crate::config::Config;
use crate::openapi::swagger_ui;

/// Everything the server and the bootstrap step need.
pub struct App {
    pub router: Router,
    pub auth_state: AuthState,
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "auth",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the full application router from configuration.
///
/// Layering order matters: only the session, admin, and tenant routers
/// sit behind the auth resolver; health, login, invite acceptance, and
/// the docs stay public.
pub fn build(config: &Config) -> Result<App, orvio_auth::AuthError> {
    let principals = InMemoryPrincipalStore::shared();
    let tenants = InMemoryTenantStore::shared();
    let invites = InMemoryInviteStore::shared();

    let hasher = PasswordHasher::with_params(config.hash_memory_kib, config.hash_iterations, 1)?;

    let auth_state = AuthState::new(
        principals.clone(),
        tenants.clone(),
        invites.clone(),
        TokenKeys::from_secret(config.jwt_secret.as_bytes()),
        hasher.clone(),
        config.token_ttl_secs,
    );
    let tenants_state = TenantsState::new(
        tenants,
        principals,
        invites,
        hasher,
        config.default_tenant_status,
    );

    let protected = auth_session_router()
        .merge(principal_admin_router())
        .with_state(auth_state.clone())
        .merge(tenants_router().with_state(tenants_state))
        .layer(axum::middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));

    let router = Router::new()
        .route("/health", get(health))
        .merge(swagger_ui())
        .merge(auth_public_router().with_state(auth_state.clone()))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    Ok(App { router, auth_state })
}

/// Wait for Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn config() -> Config {
        Config::load(|name| match name {
            "JWT_SECRET" => Some("unit-test-secret".to_string()),
            "HASH_MEMORY_KIB" => Some("4096".to_string()),
            "HASH_ITERATIONS" => Some("1".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = build(&config()).unwrap();
        let response = app
            .router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn protected_routes_reject_anonymous_calls() {
        let app = build(&config()).unwrap();

        for uri in ["/auth/me", "/tenants"] {
            let response = app
                .router
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn openapi_spec_is_served() {
        let app = build(&config()).unwrap();
        let response = app
            .router
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
