#![no_main]

use semver_lax::{Range, Version};

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if s.chars().all(|s| !s.is_control()) {
            let _ = Version::try_parse(s);
            let _ = Range::try_parse(s);
        }
    }
});
