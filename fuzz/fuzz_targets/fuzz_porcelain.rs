#![no_main]

use libfuzzer_sys::fuzz_target;

use tsratchet::domain::services::parse_status;

fuzz_target!(|data: &[u8]| {
    if let Ok(output) = std::str::from_utf8(data) {
        for entry in parse_status(output) {
            assert!(!entry.path.is_empty());
        }
    }
});
