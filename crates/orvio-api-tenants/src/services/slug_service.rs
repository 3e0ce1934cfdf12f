//! Slug derivation and validation.
//!
//! Slugs are lowercase alphanumeric with single interior hyphens, at
//! most 63 characters, and immutable once assigned.

use crate::error::TenantError;

/// Maximum slug length (DNS-label sized).
pub const MAX_SLUG_LEN: usize = 63;

/// Derive a slug from a display name.
///
/// Lowercases, maps every non-alphanumeric run to a single hyphen,
/// trims edge hyphens, and truncates to [`MAX_SLUG_LEN`]. A name with
/// no usable characters falls back to `"tenant"`.
#[must_use]
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "tenant".to_string()
    } else {
        slug
    }
}

/// Validate a caller-supplied slug.
pub fn validate_slug(slug: &str) -> Result<(), TenantError> {
    let invalid = |message: &str| TenantError::ValidationField {
        field: "slug".to_string(),
        message: message.to_string(),
    };

    if slug.is_empty() {
        return Err(invalid("Slug is required"));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(invalid("Slug exceeds 63 characters"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(invalid("Slug cannot start or end with a hyphen"));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid(
            "Slug may only contain lowercase letters, digits, and hyphens",
        ));
    }
    Ok(())
}
