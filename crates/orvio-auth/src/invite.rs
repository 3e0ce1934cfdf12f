//! One-time owner invite codes and generated passwords.
//!
//! Invite codes are 32 random bytes encoded as URL-safe base64 (256-bit
//! entropy). Only the SHA-256 hash of a code is persisted; the raw code
//! is revealed exactly once, in the response to the provisioning call.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::{rngs::OsRng, Rng, RngCore};
use sha2::{Digest, Sha256};

/// Invite codes expire after this many days.
pub const INVITE_TTL_DAYS: i64 = 7;

/// Length of generated one-time passwords.
const GENERATED_PASSWORD_LEN: usize = 20;

/// Generate a cryptographically secure invite code.
#[must_use]
pub fn generate_invite_code() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash an invite code for storage (SHA-256, hex encoded).
#[must_use]
pub fn hash_invite_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a random password for reveal-once owner provisioning.
///
/// Always contains at least one letter and one digit so it passes the
/// same baseline validation applied to chosen passwords.
#[must_use]
pub fn generate_password() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";
    let mut rng = OsRng;

    loop {
        let password: String = (0..GENERATED_PASSWORD_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect();

        let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if has_letter && has_digit {
            return password;
        }
    }
}
