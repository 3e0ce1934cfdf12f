//! Error types for store operations.

use orvio_core::TenantId;
use thiserror::Error;

use crate::models::tenant::TenantStatus;

/// Errors surfaced by the store traits.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A principal with this email already exists (case-insensitive).
    #[error("Email already registered")]
    DuplicateEmail,

    /// A tenant with this slug already exists.
    #[error("Slug already exists: {0}")]
    DuplicateSlug(String),

    /// The referenced entity does not exist.
    #[error("{resource} {id} not found")]
    NotFound {
        resource: &'static str,
        id: String,
    },

    /// Optimistic status update lost the race: the stored status no
    /// longer matches the expected one.
    #[error("Tenant status changed concurrently: expected {expected}, found {actual}")]
    StaleStatus {
        expected: TenantStatus,
        actual: TenantStatus,
    },
}

impl StoreError {
    /// Convenience constructor for a missing tenant.
    #[must_use]
    pub fn tenant_not_found(id: TenantId) -> Self {
        StoreError::NotFound {
            resource: "Tenant",
            id: id.to_string(),
        }
    }

    /// Convenience constructor for a missing principal.
    #[must_use]
    pub fn principal_not_found(id: impl ToString) -> Self {
        StoreError::NotFound {
            resource: "Principal",
            id: id.to_string(),
        }
    }

    /// Convenience constructor for a missing invite.
    #[must_use]
    pub fn invite_not_found(id: impl ToString) -> Self {
        StoreError::NotFound {
            resource: "Invite",
            id: id.to_string(),
        }
    }

    /// True when the error means "no such entity".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
