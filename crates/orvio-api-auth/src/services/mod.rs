//! Business logic behind the authentication API.

pub mod auth_service;
pub mod principal_service;

pub use auth_service::{AuthService, RequestMeta};
pub use principal_service::PrincipalService;
