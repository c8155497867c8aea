#![no_main]

use libfuzzer_sys::fuzz_target;
use siteship::domain::value_objects::KeyPrefix;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(prefix) = KeyPrefix::parse(raw) {
            let key = prefix.object_key("index.html");
            assert_eq!(prefix.strip(&key), Some("index.html"));
        }
    }
});
