//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(dburl::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(dburl::config), help("check the file passed with --config"))]
    Config(String),

    /// URL parsing error
    #[error("Parse error: {0}")]
    #[diagnostic(code(dburl::parse))]
    Parse(#[from] dburl::DburlError),

    /// JSON output error
    #[error("JSON error: {0}")]
    #[diagnostic(code(dburl::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Wrap a library error raised while loading configuration.
    pub fn config(err: dburl::DburlError) -> Self {
        match err {
            dburl::DburlError::Config(msg) => CliError::Config(msg),
            other => CliError::Config(other.to_string()),
        }
    }
}
