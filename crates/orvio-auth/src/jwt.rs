//! Token encoding and decoding with HS256.
//!
//! The signing secret is injected at construction via [`TokenKeys`]
//! rather than read from ambient state, so tests can substitute
//! fixtures without process-wide side effects. Verification pins the
//! algorithm list to HS256; a token declaring any other algorithm is
//! rejected before its signature is even considered.

use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};

use crate::claims::Claims;
use crate::error::AuthError;

/// Encoding and decoding keys derived from the server-held secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    /// Derive both keys from a shared secret.
    #[must_use]
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material never appears in debug output.
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

/// Configuration for token validation.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Leeway in seconds for exp/iat validation (clock skew tolerance).
    pub leeway: u64,
    /// Expected issuer (if set, tokens with a different issuer are rejected).
    pub issuer: Option<String>,
    /// Whether to validate expiration.
    pub validate_exp: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            leeway: 60,
            issuer: None,
            validate_exp: true,
        }
    }
}

impl ValidationConfig {
    /// Create a validation config with custom leeway.
    #[must_use]
    pub fn with_leeway(leeway: u64) -> Self {
        Self {
            leeway,
            ..Default::default()
        }
    }

    /// Set the expected issuer.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.issuer = Some(iss.into());
        self
    }

    /// Disable expiration validation (use with caution).
    #[must_use]
    pub fn skip_exp_validation(mut self) -> Self {
        self.validate_exp = false;
        self
    }
}

/// Encode claims into a signed compact token.
///
/// # Errors
///
/// Returns `AuthError::MalformedToken` if serialization fails.
pub fn encode_token(claims: &Claims, keys: &TokenKeys) -> Result<String, AuthError> {
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &keys.encoding)
        .map_err(|e| AuthError::MalformedToken(format!("Encoding failed: {e}")))
}

/// Decode and validate a token with the default [`ValidationConfig`].
///
/// # Errors
///
/// - `AuthError::TokenExpired` - embedded expiry is in the past
/// - `AuthError::InvalidSignature` - signature does not verify
/// - `AuthError::InvalidAlgorithm` - token declares a non-HS256 algorithm
/// - `AuthError::MalformedToken` - input is not a well-formed token
/// - `AuthError::MissingClaim` - a required claim is absent
pub fn decode_token(token: &str, keys: &TokenKeys) -> Result<Claims, AuthError> {
    decode_token_with_config(token, keys, &ValidationConfig::default())
}

/// Decode and validate a token with a custom validation config.
pub fn decode_token_with_config(
    token: &str,
    keys: &TokenKeys,
    config: &ValidationConfig,
) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = config.leeway;
    validation.validate_exp = config.validate_exp;
    validation.validate_aud = false;

    // Only HS256 is ever accepted.
    validation.algorithms = vec![Algorithm::HS256];

    if let Some(ref iss) = config.issuer {
        validation.set_issuer(&[iss]);
    }

    let token_data: TokenData<Claims> =
        decode(token, &keys.decoding, &validation).map_err(map_jwt_error)?;

    Ok(token_data.claims)
}

/// Map jsonwebtoken errors to [`AuthError`].
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            AuthError::InvalidAlgorithm
        }
        ErrorKind::InvalidToken => AuthError::MalformedToken("Malformed token".to_string()),
        ErrorKind::Base64(_) => AuthError::MalformedToken("Invalid base64 encoding".to_string()),
        ErrorKind::Json(_) => AuthError::MalformedToken("Invalid JSON in claims".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.to_string()),
        _ => AuthError::MalformedToken(format!("Token validation failed: {err}")),
    }
}
