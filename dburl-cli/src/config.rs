//! Registry loading for the CLI.

use std::path::Path;

use dburl::{Parser, Registry, RegistryConfig};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Build a parser from the base registry plus the optional config file.
pub fn load_parser(config: Option<&Path>) -> CliResult<Parser> {
    let mut registry = Registry::base().map_err(CliError::config)?;

    if let Some(path) = config {
        debug!(path = %path.display(), "loading registry configuration");
        let content = std::fs::read_to_string(path)?;
        let config = RegistryConfig::from_toml(&content).map_err(CliError::config)?;
        config.apply(&mut registry).map_err(CliError::config)?;
    }

    Ok(Parser::new(registry))
}
