//! Fuzz target for invite-code hashing.
//!
//! The stored hash must be deterministic hex SHA-256 for any input.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_invite_code_hash -- -max_total_time=600

#![no_main]

use libfuzzer_sys::fuzz_target;
use orvio_auth::hash_invite_code;

fuzz_target!(|data: &[u8]| {
    if let Ok(code) = std::str::from_utf8(data) {
        let hash = hash_invite_code(code);

        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, hash_invite_code(code));

        // The hash is never the identity.
        assert_ne!(hash, code);
    }
});
