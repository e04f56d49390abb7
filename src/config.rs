//! Registry configuration files.
//!
//! A TOML file can remove built-in schemes, register new ones and add
//! aliases:
//!
//! ```toml
//! unregister = ["n1ql"]
//!
//! [[scheme]]
//! driver = "timescale"
//! generator = "postgres"
//! transports = ["unix"]
//! aliases = ["ts"]
//! override = "postgres"
//!
//! [[alias]]
//! scheme = "postgres"
//! alias = "pq"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dsn::Generator;
use crate::error::{DburlError, DburlResult};
use crate::registry::Registry;
use crate::scheme::Scheme;
use crate::transport::Transport;

/// Registry changes loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Schemes (by driver or alias) to remove.
    #[serde(default)]
    pub unregister: Vec<String>,

    /// Schemes to register.
    #[serde(default, rename = "scheme")]
    pub schemes: Vec<SchemeConfig>,

    /// Aliases to add.
    #[serde(default, rename = "alias")]
    pub aliases: Vec<AliasConfig>,
}

/// A scheme entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemeConfig {
    /// Driver token.
    pub driver: String,

    /// Generator, e.g. `mysql`, `passthrough:hdb` or `template:http://localhost:8080/`.
    pub generator: String,

    /// Permitted transports (`tcp`, `udp`, `unix`, `any`).
    #[serde(default)]
    pub transports: Vec<String>,

    /// Whether the scheme takes `scheme:opaque` input.
    #[serde(default)]
    pub opaque: bool,

    /// Aliases.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Driver name to present instead of `driver`.
    #[serde(default, rename = "override")]
    pub override_driver: Option<String>,

    /// Driver name to open with.
    #[serde(default)]
    pub open_as: Option<String>,
}

/// An alias entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AliasConfig {
    /// Driver or alias of the target scheme.
    pub scheme: String,
    /// New alias.
    pub alias: String,
}

impl RegistryConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> DburlResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DburlError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> DburlResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply to `registry`: unregister, then register, then alias.
    ///
    /// Stops at the first failure.
    pub fn apply(&self, registry: &mut Registry) -> DburlResult<()> {
        for name in &self.unregister {
            if registry.unregister(name).is_none() {
                debug!(name = %name, "nothing to unregister");
            }
        }
        for entry in &self.schemes {
            registry.register(entry.to_scheme()?)?;
        }
        for entry in &self.aliases {
            registry.register_alias(&entry.scheme, &entry.alias)?;
        }
        Ok(())
    }
}

impl SchemeConfig {
    /// Build the scheme this entry describes.
    pub fn to_scheme(&self) -> DburlResult<Scheme> {
        let generator: Generator = self.generator.parse()?;
        let mut transport = Transport::NONE;
        for token in &self.transports {
            transport |= Transport::from_token(token)
                .ok_or_else(|| DburlError::Config(format!("unknown transport '{}'", token)))?;
        }

        let mut scheme = Scheme::new(self.driver.as_str(), generator)
            .with_transport(transport)
            .with_aliases(self.aliases.iter().cloned());
        scheme.opaque = self.opaque;
        scheme.override_driver = self.override_driver.clone();
        scheme.open_as = self.open_as.clone();
        Ok(scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, RegistryError};

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(RegistryConfig::from_toml("").unwrap(), RegistryConfig::default());
    }

    #[test]
    fn test_parse_scheme_entry() {
        let config = RegistryConfig::from_toml(
            r#"
            [[scheme]]
            driver = "timescale"
            generator = "postgres"
            transports = ["unix"]
            aliases = ["ts"]
            override = "postgres"
            "#,
        )
        .unwrap();

        let scheme = config.schemes[0].to_scheme().unwrap();
        assert_eq!(scheme.driver, "timescale");
        assert_eq!(scheme.transport, Transport::UNIX);
        assert_eq!(scheme.override_driver.as_deref(), Some("postgres"));
        assert!(!scheme.opaque);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = RegistryConfig::from_toml("colour = \"blue\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_unknown_transport_rejected() {
        let entry = SchemeConfig {
            driver: "x1".into(),
            generator: "opaque".into(),
            transports: vec!["carrier-pigeon".into()],
            opaque: true,
            aliases: vec![],
            override_driver: None,
            open_as: None,
        };
        assert!(matches!(entry.to_scheme(), Err(DburlError::Config(_))));
    }

    #[test]
    fn test_apply_order() {
        let config = RegistryConfig::from_toml(
            r#"
            unregister = ["mymysql"]

            [[scheme]]
            driver = "zmdb"
            generator = "opaque"
            opaque = true
            aliases = ["zm"]

            [[alias]]
            scheme = "zmdb"
            alias = "zed"
            "#,
        )
        .unwrap();

        let mut registry = Registry::base().unwrap();
        config.apply(&mut registry).unwrap();
        assert!(!registry.contains("mymysql"));
        assert_eq!(registry.get("zm").unwrap().driver, "zmdb");
        assert_eq!(registry.get("zed").unwrap().driver, "zmdb");
    }

    #[test]
    fn test_apply_stops_at_first_failure() {
        let config = RegistryConfig::from_toml(
            r#"
            [[alias]]
            scheme = "postgres"
            alias = "my"
            "#,
        )
        .unwrap();
        let mut registry = Registry::base().unwrap();
        assert_eq!(
            config.apply(&mut registry),
            Err(DburlError::Registry(RegistryError::DuplicateAlias("my".into())))
        );
    }
}
