//! Fuzzes the RGB Fusion 2.0 init response decoder.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_init_response
#![no_main]
use libfuzzer_sys::fuzz_target;
use rgb_fusion2_hid_protocol::parse_init_response;

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes.
    if let Ok(identity) = parse_init_response(data) {
        assert!(identity.name.is_ascii());
        assert!(identity.name.len() <= data.len().saturating_sub(12));
    }
});
