// SPDX-License-Identifier: Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok((owner, repo)) = issuelens_core::parse_repo_url(s) {
            assert!(!owner.is_empty() && !repo.is_empty());
            assert!(!owner.contains('/') && !repo.contains('/'));
        }
    }
});
