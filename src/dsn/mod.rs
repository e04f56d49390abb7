//! DSN generator styles.
//!
//! A [`Generator`] turns a decomposed [`Url`] into the connection string a
//! driver expects. Each variant is one output grammar; the variants carry
//! whatever parameters that grammar needs, so schemes are fully described
//! by data.
//!
//! ```rust
//! use dburl::dsn::{Generator, KeyValueStyle};
//!
//! let g: Generator = "sqlserver".parse().unwrap();
//! assert_eq!(g, Generator::KeyValue(KeyValueStyle::SqlServer));
//! assert_eq!(g.to_string(), "sqlserver");
//!
//! let g: Generator = "template:postgres://localhost:5439/".parse().unwrap();
//! assert_eq!(g.to_string(), "template:postgres://localhost:5439/");
//! ```

mod file;
mod keyvalue;
mod options;
mod positional;
mod socket;
mod template;

use std::fmt;
use std::str::FromStr;

use crate::error::{DburlError, DburlResult};
use crate::fs::Filesystem;
use crate::url::{Endpoint, Url};

pub use file::sniff_engine;
pub use template::Template;

/// Key/value (`Key=value;...`) output grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyValueStyle {
    /// SQL Server: `Database=..;Password=..;Server=host\instance;User ID=..`.
    SqlServer,
    /// SAP SQL Anywhere: `Host=..;LINKS=tcpip(PORT=..);UID=..`.
    Sybase,
    /// ADODB: the host is the provider.
    Adodb,
    /// ODBC: the transport names the ODBC driver.
    Odbc,
    /// OLE DB over ODBC: ODBC options wrapped in `Extended Properties`.
    OleOdbc,
}

/// Separator-joined positional output grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionalStyle {
    /// `user/pass@host:port/service`; user and host are mandatory.
    Oracle,
    /// `user/pass@//host:port/service`.
    Godror,
    /// `user:pass@host:port/path` without a scheme.
    Firebird,
    /// `user|pass|store://host/path`; a user requires a password.
    Yql,
    /// `host:port`.
    VoltDb,
}

/// Output grammars that probe the filesystem for unix sockets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketStyle {
    /// libpq key/value; socket locations are directories.
    Postgres,
    /// go-sql-driver/mysql; socket locations are socket files.
    MySql,
    /// mymysql `proto:addr,opts*db/user/pass`.
    MyMySql,
}

/// Output grammars for single-file engines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileStyle {
    /// The opaque path plus the query.
    Opaque,
    /// Like [`FileStyle::Opaque`], but the engine is detected from the file.
    Sniff {
        /// Engine used when the file does not decide.
        default: String,
    },
}

/// A DSN generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generator {
    /// Re-serialize the URL under a fixed scheme.
    Passthrough {
        /// Scheme written in the DSN.
        scheme: String,
    },
    /// Merge the URL over a base URL.
    Template(Template),
    /// Key/value output.
    KeyValue(KeyValueStyle),
    /// Positional output.
    Positional(PositionalStyle),
    /// Socket-probing output.
    Socket(SocketStyle),
    /// File engine output.
    File(FileStyle),
}

/// The result of generating a DSN.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Generated {
    pub dsn: String,
    /// Driver to open with, when it differs from the scheme's.
    pub open_driver: Option<String>,
    /// Resolved (host, port, database), when the generator knows better
    /// than the raw URL fields.
    pub endpoint: Option<Endpoint>,
}

impl Generated {
    pub(crate) fn dsn(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            ..Self::default()
        }
    }
}

impl Generator {
    /// Generate the DSN for `url`.
    pub(crate) fn generate(&self, url: &Url, fs: &dyn Filesystem) -> DburlResult<Generated> {
        match self {
            Self::Passthrough { scheme } => Ok(Generated::dsn(template::passthrough(url, scheme))),
            Self::Template(t) => Ok(Generated::dsn(t.merge(url))),
            Self::KeyValue(style) => keyvalue::generate(*style, url, fs),
            Self::Positional(style) => positional::generate(*style, url).map(Generated::dsn),
            Self::Socket(style) => socket::generate(*style, url, fs),
            Self::File(style) => file::generate(style, url, fs),
        }
    }

    /// Name of the style, as accepted by [`FromStr`].
    pub fn style_name(&self) -> &'static str {
        match self {
            Self::Passthrough { .. } => "passthrough",
            Self::Template(_) => "template",
            Self::KeyValue(KeyValueStyle::SqlServer) => "sqlserver",
            Self::KeyValue(KeyValueStyle::Sybase) => "sybase",
            Self::KeyValue(KeyValueStyle::Adodb) => "adodb",
            Self::KeyValue(KeyValueStyle::Odbc) => "odbc",
            Self::KeyValue(KeyValueStyle::OleOdbc) => "oleodbc",
            Self::Positional(PositionalStyle::Oracle) => "oracle",
            Self::Positional(PositionalStyle::Godror) => "godror",
            Self::Positional(PositionalStyle::Firebird) => "firebird",
            Self::Positional(PositionalStyle::Yql) => "yql",
            Self::Positional(PositionalStyle::VoltDb) => "voltdb",
            Self::Socket(SocketStyle::Postgres) => "postgres",
            Self::Socket(SocketStyle::MySql) => "mysql",
            Self::Socket(SocketStyle::MyMySql) => "mymysql",
            Self::File(FileStyle::Opaque) => "opaque",
            Self::File(FileStyle::Sniff { .. }) => "sniff",
        }
    }
}

impl FromStr for Generator {
    type Err = DburlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };

        let generator = match (name.to_ascii_lowercase().as_str(), arg) {
            ("passthrough", Some(scheme)) if !scheme.is_empty() => Self::Passthrough {
                scheme: scheme.to_string(),
            },
            ("template", Some(url)) => Self::Template(Template::parse(url)?),
            ("sniff", arg) => Self::File(FileStyle::Sniff {
                default: arg.filter(|a| !a.is_empty()).unwrap_or("sqlite3").to_string(),
            }),
            (name, None) => match name {
                "sqlserver" => Self::KeyValue(KeyValueStyle::SqlServer),
                "sybase" => Self::KeyValue(KeyValueStyle::Sybase),
                "adodb" => Self::KeyValue(KeyValueStyle::Adodb),
                "odbc" => Self::KeyValue(KeyValueStyle::Odbc),
                "oleodbc" => Self::KeyValue(KeyValueStyle::OleOdbc),
                "oracle" => Self::Positional(PositionalStyle::Oracle),
                "godror" => Self::Positional(PositionalStyle::Godror),
                "firebird" => Self::Positional(PositionalStyle::Firebird),
                "yql" => Self::Positional(PositionalStyle::Yql),
                "voltdb" => Self::Positional(PositionalStyle::VoltDb),
                "postgres" => Self::Socket(SocketStyle::Postgres),
                "mysql" => Self::Socket(SocketStyle::MySql),
                "mymysql" => Self::Socket(SocketStyle::MyMySql),
                "opaque" => Self::File(FileStyle::Opaque),
                _ => return Err(DburlError::Config(format!("unknown generator '{}'", s))),
            },
            _ => return Err(DburlError::Config(format!("unknown generator '{}'", s))),
        };
        Ok(generator)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passthrough { scheme } => write!(f, "passthrough:{}", scheme),
            Self::Template(t) => write!(f, "template:{}", t.as_str()),
            Self::File(FileStyle::Sniff { default }) => write!(f, "sniff:{}", default),
            other => write!(f, "{}", other.style_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_styles() {
        assert_eq!(
            "ODBC".parse::<Generator>().unwrap(),
            Generator::KeyValue(KeyValueStyle::Odbc)
        );
        assert_eq!(
            "mysql".parse::<Generator>().unwrap(),
            Generator::Socket(SocketStyle::MySql)
        );
        assert_eq!(
            "passthrough:hdb".parse::<Generator>().unwrap(),
            Generator::Passthrough {
                scheme: "hdb".to_string()
            }
        );
    }

    #[test]
    fn test_from_str_sniff_default() {
        assert_eq!(
            "sniff".parse::<Generator>().unwrap(),
            Generator::File(FileStyle::Sniff {
                default: "sqlite3".to_string()
            })
        );
        assert_eq!(
            "sniff:duckdb".parse::<Generator>().unwrap().to_string(),
            "sniff:duckdb"
        );
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(matches!(
            "nosuch".parse::<Generator>(),
            Err(DburlError::Config(_))
        ));
        assert!(matches!(
            "passthrough:".parse::<Generator>(),
            Err(DburlError::Config(_))
        ));
        assert!(matches!(
            "oracle:extra".parse::<Generator>(),
            Err(DburlError::Config(_))
        ));
    }

    #[test]
    fn test_template_parse_error_is_returned() {
        assert_eq!(
            "template:not a url".parse::<Generator>(),
            Err(DburlError::InvalidScheme)
        );
    }
}
