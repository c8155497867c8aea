#![no_main]

use libfuzzer_sys::fuzz_target;
use siteship::domain::services::EdgeEvent;

fuzz_target!(|data: &[u8]| {
    if let Ok(event) = serde_json::from_slice::<EdgeEvent>(data) {
        let request = siteship::EdgeRequestRewriter::default().handle(event);
        let _ = serde_json::to_string(&request);
    }
});
