#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing must reject bad input with an error, never a panic
        if let Ok(config) = toml::from_str::<tsratchet::Config>(content) {
            let _ = config.orchestrator_options(std::path::Path::new("/repo"));
        }
    }
});
