//! Error types for URL parsing, registry mutation and DSN generation.
//!
//! Every error is a plain value: errors derive `Clone` and `PartialEq` so
//! callers can match on them (or on [`ErrorKind`]) instead of comparing
//! message strings.
//!
//! ```rust
//! use dburl::{DburlError, ErrorKind};
//!
//! let err = dburl::parse("foobar://anything").unwrap_err();
//! assert_eq!(err, DburlError::UnknownScheme("foobar".to_string()));
//! assert_eq!(err.kind(), ErrorKind::UnknownScheme);
//! ```

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type for dburl operations.
pub type DburlResult<T> = Result<T, DburlError>;

/// A URL component that a generator requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// The host (or socket location).
    Host,
    /// The username.
    User,
    /// The path (database file or name).
    Path,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::User => write!(f, "user"),
            Self::Path => write!(f, "path"),
        }
    }
}

/// Errors raised while mutating a [`Registry`](crate::Registry).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A scheme with this driver token is already registered.
    #[error("scheme '{0}' is already registered")]
    DuplicateScheme(String),

    /// The alias already resolves to another scheme.
    #[error("alias '{0}' is already registered")]
    DuplicateAlias(String),

    /// No scheme is registered under this name.
    #[error("scheme '{0}' is not registered")]
    UnknownScheme(String),

    /// The driver token cannot be registered.
    #[error("invalid driver token '{0}': must be at least 2 characters of [a-z0-9.-]")]
    InvalidDriver(String),
}

/// Errors that can occur while parsing a database URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DburlError {
    /// Malformed per the generic URI grammar.
    #[error("invalid URL syntax: {0}")]
    Syntax(String),

    /// The URL does not start with a scheme.
    #[error("invalid database scheme")]
    InvalidScheme,

    /// The scheme is not registered.
    #[error("unknown database scheme '{0}'")]
    UnknownScheme(String),

    /// The transport is not permitted for the scheme.
    #[error("invalid transport protocol '{transport}' for scheme '{scheme}'")]
    InvalidTransport {
        /// Scheme driver token.
        scheme: String,
        /// Requested transport.
        transport: String,
    },

    /// A mandatory component is missing.
    #[error("missing {0}")]
    Missing(Component),

    /// The port is not a valid number.
    #[error("invalid port '{0}'")]
    InvalidPort(String),

    /// A relative socket path was given to a driver that needs an absolute path.
    #[error("{0}: relative socket paths are not supported")]
    RelativePathNotSupported(String),

    /// A driver-specific field combination is not supported.
    #[error("{driver}: {reason}")]
    Unsupported {
        /// Scheme driver token.
        driver: String,
        /// What went wrong.
        reason: String,
    },

    /// Reading from the filesystem failed in a way that cannot fall back.
    #[error("unable to probe '{path}': {kind}")]
    FilesystemProbe {
        /// Probed path.
        path: String,
        /// Underlying I/O error kind.
        kind: io::ErrorKind,
    },

    /// Registry mutation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration could not be loaded or applied.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`DburlError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// [`DburlError::Syntax`] or [`DburlError::InvalidScheme`].
    Syntax,
    /// [`DburlError::UnknownScheme`].
    UnknownScheme,
    /// [`DburlError::InvalidTransport`].
    InvalidTransport,
    /// [`DburlError::Missing`].
    MissingComponent,
    /// [`DburlError::InvalidPort`].
    InvalidField,
    /// [`DburlError::RelativePathNotSupported`] or [`DburlError::Unsupported`].
    UnsupportedCombination,
    /// [`DburlError::FilesystemProbe`].
    FilesystemProbe,
    /// [`DburlError::Registry`].
    Registry,
    /// [`DburlError::Config`].
    Config,
}

impl DburlError {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) | Self::InvalidScheme => ErrorKind::Syntax,
            Self::UnknownScheme(_) => ErrorKind::UnknownScheme,
            Self::InvalidTransport { .. } => ErrorKind::InvalidTransport,
            Self::Missing(_) => ErrorKind::MissingComponent,
            Self::InvalidPort(_) => ErrorKind::InvalidField,
            Self::RelativePathNotSupported(_) | Self::Unsupported { .. } => {
                ErrorKind::UnsupportedCombination
            }
            Self::FilesystemProbe { .. } => ErrorKind::FilesystemProbe,
            Self::Registry(_) => ErrorKind::Registry,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Create an unsupported-combination error.
    pub fn unsupported(driver: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            driver: driver.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn probe(path: &str, err: &io::Error) -> Self {
        Self::FilesystemProbe {
            path: path.to_string(),
            kind: err.kind(),
        }
    }
}

impl From<toml::de::Error> for DburlError {
    fn from(err: toml::de::Error) -> Self {
        DburlError::Config(format!("failed to parse TOML: {}", err))
    }
}
