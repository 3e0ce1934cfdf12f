//! orvio authentication primitives
//!
//! Stateless building blocks consumed by the API crates:
//!
//! - [`claims`] - the session token claims bundle and its builder
//! - [`jwt`] - HS256 signing and verification against an injected secret
//! - [`password`] - Argon2id hashing with a tunable work factor
//! - [`invite`] - one-time owner invite codes and generated passwords
//!
//! Everything here is a pure function of its inputs plus injected key
//! material; nothing reads ambient global state.

pub mod claims;
pub mod error;
pub mod invite;
pub mod jwt;
pub mod password;

pub use claims::{Claims, ClaimsBuilder, DEFAULT_TOKEN_TTL_SECS};
pub use error::AuthError;
pub use invite::{generate_invite_code, generate_password, hash_invite_code, INVITE_TTL_DAYS};
pub use jwt::{decode_token, decode_token_with_config, encode_token, TokenKeys, ValidationConfig};
pub use password::{
    hash_password, verify_password, PasswordHasher, DEFAULT_ITERATIONS, DEFAULT_MEMORY_KIB,
};
