//! `dburl version` command - Display version information.

use std::collections::BTreeMap;

use dburl::Parser;

use crate::error::CliResult;
use crate::output::{self, kv};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the version command
pub fn run(parser: &Parser) -> CliResult<()> {
    output::newline();

    kv("Version", VERSION);
    kv("Binary", NAME);

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    kv("Build", build_mode);
    kv("Log format", dburl::logging::get_log_format());
    output::newline();

    output::section("Registry");
    let schemes = parser.registry().schemes();
    let aliases: usize = schemes.iter().map(|s| s.aliases.len()).sum();
    kv("Schemes", &schemes.len().to_string());
    kv("Aliases", &aliases.to_string());

    let mut styles: BTreeMap<&str, usize> = BTreeMap::new();
    for scheme in &schemes {
        *styles.entry(scheme.generator.style_name()).or_default() += 1;
    }
    for (style, count) in styles {
        kv(style, &count.to_string());
    }

    output::newline();
    output::dim("https://github.com/pegasusheavy/dburl-rs");

    Ok(())
}
