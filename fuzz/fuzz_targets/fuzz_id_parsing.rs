//! Fuzz target for typed ID parsing.
//!
//! Malformed input must fail cleanly; valid UUIDs must round-trip
//! through the newtypes.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_id_parsing -- -max_total_time=600

#![no_main]

use libfuzzer_sys::fuzz_target;
use orvio_core::{PrincipalId, TenantId};
use uuid::Uuid;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(id) = s.parse::<TenantId>() {
            let formatted = id.to_string();
            let reparsed: TenantId = formatted.parse().unwrap();
            assert_eq!(id, reparsed);
        }

        // Both newtypes agree on what parses.
        assert_eq!(
            s.parse::<TenantId>().is_ok(),
            s.parse::<PrincipalId>().is_ok()
        );
    }

    if data.len() == 16 {
        let uuid = Uuid::from_slice(data).unwrap();
        let id = TenantId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }
});
