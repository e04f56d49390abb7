//! Fuzz target for the URL parser.
//!
//! Feeds arbitrary strings to `dburl::parse` and to the presentation
//! helpers of anything that parses.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_parse
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parse must never panic, only return errors
        if let Ok(url) = dburl::parse(input) {
            let _ = url.short();
            let _ = url.normalize(":", "", 3);

            // A displayed URL parses back to the same password
            if let Ok(again) = dburl::parse(&url.to_string()) {
                assert_eq!(again.password(), url.password());
            }
        }
    }
});
