//! Fuzz target for password hashing.
//!
//! Looks for panics and hash-format issues in hashing and verification
//! of arbitrary passwords.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_password_hash -- -max_total_time=600

#![no_main]

use libfuzzer_sys::fuzz_target;
use orvio_auth::PasswordHasher;

fuzz_target!(|data: &[u8]| {
    if let Ok(password) = std::str::from_utf8(data) {
        // Cap the length to keep per-input time bounded.
        if password.len() > 512 {
            return;
        }

        // Minimal work factor: the target is parsing and control flow,
        // not Argon2 itself.
        let hasher = PasswordHasher::with_params(1024, 1, 1).expect("valid parameters");

        if let Ok(hash) = hasher.hash(password) {
            assert!(hash.starts_with("$argon2id$"));
            assert!(hasher.verify(password, &hash).expect("own hash verifies"));
            assert!(!hasher
                .verify("definitely_wrong_password", &hash)
                .expect("well-formed hash"));
        }
    }
});
