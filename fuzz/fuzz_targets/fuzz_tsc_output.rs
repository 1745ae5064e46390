#![no_main]

use libfuzzer_sys::fuzz_target;

use tsratchet::infrastructure::tsc::parse_tsc_output;

fuzz_target!(|data: &[u8]| {
    if let Ok(output) = std::str::from_utf8(data) {
        let _ = parse_tsc_output(output, std::path::Path::new("/repo"));
    }
});
