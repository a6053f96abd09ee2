#![no_main]

use encore_release::tags::latest_tag;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|tags: Vec<&str>| {
    if let Some(version) = latest_tag(tags.iter().copied()) {
        assert!(tags.iter().any(|tag| tag.strip_prefix('v') == Some(version)));
    }
});
