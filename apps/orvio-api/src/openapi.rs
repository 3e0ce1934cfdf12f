//! OpenAPI document and Swagger UI wiring.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::app::health,
        orvio_api_auth::handlers::login::login,
        orvio_api_auth::handlers::invites::accept_invite,
        orvio_api_auth::handlers::me::me,
        orvio_api_auth::handlers::password::change_password,
        orvio_api_auth::handlers::admin::create_principal,
        orvio_api_auth::handlers::admin::update_principal_status,
        orvio_api_tenants::handlers::provisioning::create_tenant,
        orvio_api_tenants::handlers::read::list_tenants,
        orvio_api_tenants::handlers::read::get_tenant,
        orvio_api_tenants::handlers::lifecycle::update_status,
        orvio_api_tenants::handlers::lifecycle::reactivate,
        orvio_api_tenants::handlers::policy::update_quotas,
        orvio_api_tenants::handlers::policy::update_security,
        orvio_api_tenants::handlers::policy::set_password_policy,
        orvio_api_tenants::handlers::policy::add_inbound_email,
        orvio_api_tenants::handlers::policy::remove_inbound_email,
    ),
    components(schemas(
        orvio_api_auth::ErrorResponse,
        orvio_api_auth::models::LoginRequest,
        orvio_api_auth::models::LoginResponse,
        orvio_api_auth::models::AcceptInviteRequest,
        orvio_api_auth::models::ChangePasswordRequest,
        orvio_api_auth::models::CreatePrincipalRequest,
        orvio_api_auth::models::CreatePrincipalResponse,
        orvio_api_auth::models::UpdatePrincipalStatusRequest,
        orvio_api_auth::models::PrincipalProfile,
        orvio_api_tenants::models::CreateTenantRequest,
        orvio_api_tenants::models::ContactRequest,
        orvio_api_tenants::models::ProvisioningMode,
        orvio_api_tenants::models::CreateTenantResponse,
        orvio_api_tenants::models::OwnerCredentials,
        orvio_api_tenants::models::TenantResponse,
        orvio_api_tenants::models::UpdateTenantStatusRequest,
        orvio_api_tenants::models::QuotaPatch,
        orvio_api_tenants::models::SecurityPatch,
        orvio_api_tenants::models::PasswordPolicyRequest,
        orvio_api_tenants::models::AddInboundEmailRequest,
        orvio_core::Role,
        orvio_store::PrincipalStatus,
        orvio_store::TenantStatus,
        orvio_store::TenantQuotas,
        orvio_store::SecurityPolicy,
        orvio_store::PasswordPolicy,
        orvio_store::PrimaryContact,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login, sessions, invites"),
        (name = "admin", description = "Admin principal management"),
        (name = "tenants", description = "Tenant lifecycle"),
    ),
    info(
        title = "orvio control plane",
        description = "Multi-tenant SaaS control plane API",
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI at `/docs`, spec at `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
