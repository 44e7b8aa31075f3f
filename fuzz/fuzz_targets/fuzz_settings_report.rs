//! Fuzzes settings-report construction from operator-style names.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_settings_report
#![no_main]
use libfuzzer_sys::fuzz_target;
use rgb_fusion2_hid_protocol::{LightingRequest, REPORT_ID, set_address};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut parts = text.split(' ');
    let channel = parts.next().unwrap_or_default();
    let mode = parts.next().unwrap_or_default();
    let speed = parts.next().unwrap_or_default();
    let colors: Vec<&str> = parts.collect();

    let Ok(request) = LightingRequest::from_names(channel, mode, &colors, speed) else {
        return;
    };
    let Ok(template) = request.report() else {
        return;
    };
    assert_eq!(template[0], REPORT_ID);
    for address in request.selection.addresses() {
        let mut report = template;
        set_address(&mut report, address);
        assert_eq!(&report[3..], &template[3..]);
    }
});
