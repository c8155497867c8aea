#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(uri) = std::str::from_utf8(data) {
        let once = siteship::rewrite_uri(uri).into_owned();
        let twice = siteship::rewrite_uri(&once);
        assert_eq!(once, twice, "rewrite is not idempotent for {uri:?}");
    }
});
