#![no_main]

use encore_version::is_newer_version;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (candidate, baseline) = data;
    let newer = is_newer_version(candidate, baseline);
    if newer {
        assert!(!is_newer_version(baseline, candidate));
    }
    assert!(!is_newer_version(candidate, candidate));
});
