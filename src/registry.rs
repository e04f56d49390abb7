//! The scheme registry.
//!
//! A [`Registry`] is an owned value. It is populated (and optionally
//! modified) up front, then handed to a [`Parser`](crate::Parser), which
//! only ever reads it.
//!
//! ```rust
//! use dburl::{Registry, Scheme};
//! use dburl::dsn::{FileStyle, Generator};
//!
//! let mut registry = Registry::base().unwrap();
//! registry
//!     .register(Scheme::new("libsql", Generator::File(FileStyle::Opaque)).opaque())
//!     .unwrap();
//! registry.register_alias("libsql", "turso").unwrap();
//!
//! assert_eq!(registry.get("turso").unwrap().driver, "libsql");
//! assert_eq!(registry.get("li").unwrap().driver, "libsql");
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::error::{DburlResult, RegistryError};
use crate::scheme::{Scheme, base_schemes};

/// Schemes keyed by driver token, plus an alias index.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    schemes: HashMap<String, Scheme>,
    aliases: HashMap<String, String>,
}

fn valid_driver(driver: &str) -> bool {
    driver.len() >= 2
        && driver
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.' || b == b'-')
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in schemes.
    pub fn base() -> DburlResult<Self> {
        let mut registry = Self::new();
        for scheme in base_schemes()? {
            registry.register(scheme)?;
        }
        debug!(schemes = registry.len(), "built base registry");
        Ok(registry)
    }

    /// Register a scheme.
    ///
    /// The driver token and aliases are lowercased. When no alias is two
    /// characters long, the first two characters of the driver are added as
    /// one. Nothing is changed when an error is returned.
    pub fn register(&mut self, mut scheme: Scheme) -> Result<(), RegistryError> {
        scheme.driver = scheme.driver.to_ascii_lowercase();
        let driver = scheme.driver.clone();
        if !valid_driver(&driver) {
            return Err(RegistryError::InvalidDriver(driver));
        }
        if self.contains(&driver) {
            return Err(RegistryError::DuplicateScheme(driver));
        }

        let mut aliases: Vec<String> = scheme
            .aliases
            .iter()
            .map(|a| a.to_ascii_lowercase())
            .collect();
        if !aliases.iter().any(|a| a.len() == 2) {
            aliases.push(driver.chars().take(2).collect());
        }
        aliases.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        aliases.dedup();

        if let Some(taken) = aliases
            .iter()
            .find(|a| *a != &driver && self.contains(a))
        {
            return Err(RegistryError::DuplicateAlias(taken.clone()));
        }

        for alias in aliases.iter().filter(|a| *a != &driver) {
            self.aliases.insert(alias.clone(), driver.clone());
        }
        scheme.aliases = aliases;
        debug!(driver = %driver, aliases = ?scheme.aliases, "registered scheme");
        self.schemes.insert(driver, scheme);
        Ok(())
    }

    /// Remove a scheme, by driver or alias, along with its aliases.
    pub fn unregister(&mut self, name: &str) -> Option<Scheme> {
        let driver = self.resolve(name)?.to_string();
        let scheme = self.schemes.remove(&driver)?;
        self.aliases.retain(|_, target| *target != driver);
        debug!(driver = %driver, "unregistered scheme");
        Some(scheme)
    }

    /// Add an alias to a registered scheme.
    pub fn register_alias(&mut self, name: &str, alias: &str) -> Result<(), RegistryError> {
        let driver = self
            .resolve(name)
            .ok_or_else(|| RegistryError::UnknownScheme(name.to_string()))?
            .to_string();
        let alias = alias.to_ascii_lowercase();
        if self.contains(&alias) {
            return Err(RegistryError::DuplicateAlias(alias));
        }

        self.aliases.insert(alias.clone(), driver.clone());
        if let Some(scheme) = self.schemes.get_mut(&driver) {
            scheme.aliases.push(alias);
            scheme
                .aliases
                .sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        }
        Ok(())
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        if let Some((driver, _)) = self.schemes.get_key_value(&name) {
            return Some(driver);
        }
        self.aliases.get(&name).map(String::as_str)
    }

    /// Look up a scheme by driver or alias (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Scheme> {
        self.resolve(name).and_then(|driver| self.schemes.get(driver))
    }

    /// Check if a driver or alias is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Registered schemes, sorted by driver.
    pub fn schemes(&self) -> Vec<&Scheme> {
        let mut schemes: Vec<&Scheme> = self.schemes.values().collect();
        schemes.sort_by(|a, b| a.driver.cmp(&b.driver));
        schemes
    }

    /// The driver and every alias of the scheme `name` resolves to.
    pub fn protocols(&self, name: &str) -> Vec<String> {
        let Some(scheme) = self.get(name) else {
            return Vec::new();
        };
        let mut protocols = vec![scheme.driver.clone()];
        protocols.extend(
            scheme
                .aliases
                .iter()
                .filter(|a| **a != scheme.driver)
                .cloned(),
        );
        protocols
    }

    /// Number of registered schemes.
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Check if no schemes are registered.
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}
