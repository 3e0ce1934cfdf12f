//! Password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings, so the salt and parameters travel
//! with the hash and verification stays correct across work-factor
//! changes. Verification mismatch is `Ok(false)`, never an error.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::error::AuthError;

/// Default memory cost in KiB (OWASP 2024 recommendation: 19 MiB).
pub const DEFAULT_MEMORY_KIB: u32 = 19_456;

/// Default iteration count (OWASP 2024 recommendation).
pub const DEFAULT_ITERATIONS: u32 = 2;

/// Password hasher with a tunable work factor.
///
/// The work factor is injected at construction (typically from
/// configuration) rather than read from the environment here.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    /// Create a hasher with the default (OWASP 2024) parameters.
    #[must_use]
    pub fn new() -> Self {
        // These constants are always valid Argon2 parameters.
        let params = Params::new(DEFAULT_MEMORY_KIB, DEFAULT_ITERATIONS, 1, None)
            .expect("default Argon2 parameters are valid constants");

        Self { params }
    }

    /// Create a hasher with a custom work factor.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashingFailed` if the parameters are out of
    /// the range Argon2 accepts.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::HashingFailed(format!("Invalid parameters: {e}")))?;

        Ok(Self { params })
    }

    /// Hash a plaintext password, returning a PHC-format string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashingFailed` if hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingFailed(format!("Hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored PHC hash.
    ///
    /// Returns `Ok(true)` on match, `Ok(false)` on mismatch. The
    /// comparison inside Argon2 is constant-time.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidHashFormat` if `hash` is not a valid
    /// PHC string.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidHashFormat)?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(_) => Ok(false),
        }
    }
}

/// Hash a password with the default work factor.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    PasswordHasher::new().hash(password)
}

/// Verify a password against an Argon2id hash with the default hasher.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    PasswordHasher::new().verify(password, hash)
}
