#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing and domain conversion must never panic
        if let Ok(config) = toml::from_str::<siteship::Config>(content) {
            let _ = config.partitioner();
            let _ = config.orchestrator();
            let _ = config.rewriter();
        }
    }
});
