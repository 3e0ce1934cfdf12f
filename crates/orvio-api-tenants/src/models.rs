//! Request and response types for the tenant lifecycle API.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use orvio_store::{
    PasswordPolicy, PrimaryContact, SecurityPolicy, Tenant, TenantQuotas, TenantStatus,
};

use crate::error::TenantError;

const MAX_NAME_LEN: usize = 100;

/// Owner-credential delivery mode selected at tenant creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningMode {
    /// One-time invite code; the owner chooses their own password.
    #[default]
    Invite,
    /// Reveal-once generated password.
    Password,
}

/// Primary contact as submitted at creation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub timezone: Option<String>,
    pub address: Option<String>,
}

/// Tenant creation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTenantRequest {
    pub name: String,
    /// Omitted to have one generated from the name.
    pub slug: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    pub contact: ContactRequest,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub modules: BTreeSet<String>,
    #[serde(default)]
    pub provisioning: ProvisioningMode,
    /// Owner principal email; defaults to the contact email.
    pub owner_email: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl CreateTenantRequest {
    pub fn validate(&self) -> Result<(), TenantError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(field_error("name", "Company name is required"));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(field_error("name", "Company name exceeds 100 characters"));
        }

        if !is_valid_email(&self.contact.email) {
            return Err(field_error("contact.email", "Invalid contact email"));
        }
        if let Some(owner) = &self.owner_email {
            if !is_valid_email(owner) {
                return Err(field_error("owner_email", "Invalid owner email"));
            }
        }
        if self.region.trim().is_empty() {
            return Err(field_error("region", "Region is required"));
        }
        Ok(())
    }
}

/// Minimal email shape check; full verification is delivery's problem.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

fn field_error(field: &str, message: &str) -> TenantError {
    TenantError::ValidationField {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Owner-credential artifact returned exactly once at creation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OwnerCredentials {
    /// Invite-based provisioning: the code is stored only as a hash.
    OwnerInvite {
        principal_id: Uuid,
        email: String,
        code: String,
        expires_at: DateTime<Utc>,
    },
    /// Reveal-once generated password.
    Password {
        principal_id: Uuid,
        email: String,
        password: String,
    },
}

/// Tenant as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct TenantResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub status: TenantStatus,
    pub region: String,
    pub contact: PrimaryContact,
    pub features: BTreeSet<String>,
    pub modules: BTreeSet<String>,
    pub quotas: TenantQuotas,
    pub security: SecurityPolicy,
    pub inbound_emails: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tenant> for TenantResponse {
    fn from(t: Tenant) -> Self {
        Self {
            id: *t.id.as_uuid(),
            name: t.name,
            slug: t.slug,
            status: t.status,
            region: t.region,
            contact: t.contact,
            features: t.features,
            modules: t.modules,
            quotas: t.quotas,
            security: t.security,
            inbound_emails: t.inbound_emails,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Tenant creation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateTenantResponse {
    pub tenant: TenantResponse,
    pub owner: OwnerCredentials,
}

/// Status change request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTenantStatusRequest {
    pub status: TenantStatus,
}

/// Partial quota update. Present fields replace current values.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct QuotaPatch {
    pub seats: Option<i64>,
    pub storage_gb: Option<i64>,
    pub requests_per_minute: Option<i64>,
    pub retention_days: Option<i64>,
    pub departments: Option<i64>,
    pub roles: Option<i64>,
    pub projects: Option<i64>,
}

/// Partial security-policy update.
///
/// The IP lists accept a wholesale replacement and/or individual
/// append/remove operations; replacement applies first. The password
/// policy is deliberately absent: it changes only through its own
/// endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SecurityPatch {
    pub mfa_required: Option<bool>,
    pub sso_enabled: Option<bool>,
    pub audit_enabled: Option<bool>,
    pub ip_allowlist: Option<BTreeSet<String>>,
    #[serde(default)]
    pub ip_allowlist_add: Vec<String>,
    #[serde(default)]
    pub ip_allowlist_remove: Vec<String>,
    pub ip_denylist: Option<BTreeSet<String>>,
    #[serde(default)]
    pub ip_denylist_add: Vec<String>,
    #[serde(default)]
    pub ip_denylist_remove: Vec<String>,
}

/// Full password-policy replacement.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordPolicyRequest {
    pub min_length: u32,
    #[serde(default)]
    pub require_uppercase: bool,
    #[serde(default = "default_true")]
    pub require_digit: bool,
    #[serde(default)]
    pub require_symbol: bool,
}

fn default_true() -> bool {
    true
}

impl PasswordPolicyRequest {
    pub fn validate(&self) -> Result<PasswordPolicy, TenantError> {
        if !(4..=128).contains(&self.min_length) {
            return Err(field_error(
                "min_length",
                "min_length must be between 4 and 128",
            ));
        }
        Ok(PasswordPolicy {
            min_length: self.min_length,
            require_uppercase: self.require_uppercase,
            require_digit: self.require_digit,
            require_symbol: self.require_symbol,
        })
    }
}

/// Inbound-email registration request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddInboundEmailRequest {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str) -> CreateTenantRequest {
        CreateTenantRequest {
            name: name.to_string(),
            slug: None,
            region: default_region(),
            contact: ContactRequest {
                name: "John".to_string(),
                email: email.to_string(),
                phone: None,
                timezone: None,
                address: None,
            },
            features: BTreeSet::new(),
            modules: BTreeSet::new(),
            provisioning: ProvisioningMode::default(),
            owner_email: None,
        }
    }

    #[test]
    fn create_request_validation() {
        assert!(request("Acme", "john@acme.com").validate().is_ok());
        assert!(request("", "john@acme.com").validate().is_err());
        assert!(request("   ", "john@acme.com").validate().is_err());
        assert!(request(&"x".repeat(101), "john@acme.com").validate().is_err());
        assert!(request("Acme", "not-an-email").validate().is_err());
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("john@acme.com"));
        assert!(is_valid_email("a.b+c@sub.acme.io"));
        assert!(!is_valid_email("john"));
        assert!(!is_valid_email("@acme.com"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email("john@acme"));
        assert!(!is_valid_email("jo hn@acme.com"));
    }

    #[test]
    fn provisioning_mode_defaults_to_invite() {
        let req: CreateTenantRequest = serde_json::from_str(
            r#"{"name":"Acme","contact":{"email":"john@acme.com"}}"#,
        )
        .unwrap();
        assert_eq!(req.provisioning, ProvisioningMode::Invite);
        assert_eq!(req.region, "us-east-1");
    }

    #[test]
    fn owner_invite_wire_shape() {
        let artifact = OwnerCredentials::OwnerInvite {
            principal_id: Uuid::new_v4(),
            email: "john@acme.com".to_string(),
            code: "the-code".to_string(),
            expires_at: Utc::now(),
        };
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["type"], "owner_invite");
        assert_eq!(json["code"], "the-code");
    }

    #[test]
    fn password_policy_bounds() {
        let ok = PasswordPolicyRequest {
            min_length: 12,
            require_uppercase: true,
            require_digit: true,
            require_symbol: false,
        };
        assert!(ok.validate().is_ok());

        let too_small = PasswordPolicyRequest { min_length: 2, ..ok };
        assert!(too_small.validate().is_err());
    }
}
