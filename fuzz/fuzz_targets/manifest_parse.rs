//! Fuzz target for manifest parsing.
//!
//! Feeds arbitrary bytes to the `path;label` reader, checking for panics,
//! crashes, or hangs.

#![no_main]

use labelindex::manifest::format::fuzz_parse_manifest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_parse_manifest(data);
});
