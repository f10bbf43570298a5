// SPDX-License-Identifier: Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;

// Arbitrary model output must always normalize to a valid analysis.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let labels = vec!["bug".to_string(), "status: triage".to_string()];
        let analysis = issuelens_core::normalize(s, "Fuzzed title", "", &labels);
        let json = serde_json::to_value(&analysis).expect("analysis serializes");
        assert!(issuelens_core::validate(&json).is_ok());
    }
});
