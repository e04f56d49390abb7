//! Fuzz target for registry configuration files.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config
//! ```

#![no_main]

use dburl::{Registry, RegistryConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(config) = RegistryConfig::from_toml(input) {
            if let Ok(mut registry) = Registry::base() {
                let _ = config.apply(&mut registry);
            }
        }
    }
});
