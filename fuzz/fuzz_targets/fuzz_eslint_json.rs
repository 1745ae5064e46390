#![no_main]

use libfuzzer_sys::fuzz_target;

use tsratchet::infrastructure::eslint::parse_eslint_json;

fuzz_target!(|data: &[u8]| {
    if let Ok(stdout) = std::str::from_utf8(data) {
        let files = [std::path::PathBuf::from("/repo/src/a.ts")];
        let _ = parse_eslint_json(stdout, &files);
    }
});
