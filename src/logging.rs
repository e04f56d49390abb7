//! Logging setup.
//!
//! The library only emits `tracing` events. Applications that do not install
//! their own subscriber can call [`init`], which reads:
//!
//! - `DBURL_DEBUG=true|1|yes` - enable debug logging
//! - `DBURL_LOG_LEVEL=trace|debug|info|warn|error` - set the level
//! - `DBURL_LOG_FORMAT=json|pretty|compact` - set the output format (default: compact)
//!
//! Installing a subscriber requires the `tracing-subscriber` feature; without
//! it the functions here only report the settings. Output goes to stderr.
//!
//! ```rust,no_run
//! use dburl::logging;
//!
//! logging::init();
//! // or
//! logging::init_with_level("trace");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const DEBUG_VAR: &str = "DBURL_DEBUG";
const LEVEL_VAR: &str = "DBURL_LOG_LEVEL";
const FORMAT_VAR: &str = "DBURL_LOG_FORMAT";

/// Check if `DBURL_DEBUG` enables debug logging.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR).is_ok_and(|v| is_truthy(&v))
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

fn level_or(value: Option<&str>, debug: bool) -> &'static str {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ if debug => "debug",
        _ => "warn",
    }
}

fn format_or(value: Option<&str>) -> &'static str {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => "json",
        Some("pretty") => "pretty",
        _ => "compact",
    }
}

/// The level from `DBURL_LOG_LEVEL`; `debug` when `DBURL_DEBUG` is set,
/// `warn` otherwise.
pub fn get_log_level() -> &'static str {
    level_or(env::var(LEVEL_VAR).ok().as_deref(), is_debug_enabled())
}

/// The format from `DBURL_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    format_or(env::var(FORMAT_VAR).ok().as_deref())
}

/// Install a subscriber configured from the environment.
///
/// Does nothing unless `DBURL_DEBUG` or `DBURL_LOG_LEVEL` is set. Only the
/// first call of any `init*` function has an effect.
pub fn init() {
    if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
        return;
    }
    install(get_log_level(), get_log_format());
}

/// Install a subscriber at `level`, ignoring `DBURL_LOG_LEVEL`.
pub fn init_with_level(level: &str) {
    install(level_or(Some(level), false), get_log_format());
}

/// Install a subscriber at debug level.
pub fn init_debug() {
    install("debug", get_log_format());
}

fn install(level: &'static str, format: &'static str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(format!("dburl={},dburl_cli={}", level, level))
                .unwrap_or_else(|_| EnvFilter::new("warn"));
            let layer = fmt::layer().with_writer(std::io::stderr);

            let installed = match format {
                "json" => tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.json())
                    .try_init(),
                "pretty" => tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.pretty())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.compact())
                    .try_init(),
            };

            if installed.is_ok() {
                tracing::debug!(level, format, "dburl logging initialized");
            }
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            let _ = (level, format);
        }
    });
}
