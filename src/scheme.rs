//! Scheme descriptors and the built-in scheme table.

use crate::dsn::{FileStyle, Generator, KeyValueStyle, PositionalStyle, SocketStyle, Template};
use crate::error::DburlResult;
use crate::transport::Transport;

/// A registered database scheme.
///
/// ```rust
/// use dburl::{Scheme, Transport};
/// use dburl::dsn::{Generator, SocketStyle};
///
/// let scheme = Scheme::new("tidb", Generator::Socket(SocketStyle::MySql))
///     .with_transport(Transport::TCP | Transport::UNIX)
///     .with_override("mysql")
///     .with_aliases(["ti"]);
/// assert_eq!(scheme.driver, "tidb");
/// assert_eq!(scheme.exposed_driver(), "mysql");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    /// Canonical driver token.
    pub driver: String,
    /// DSN generator.
    pub generator: Generator,
    /// Permitted explicit transports.
    pub transport: Transport,
    /// Whether the generator expects `scheme:opaque` input.
    pub opaque: bool,
    /// Aliases, sorted by length then lexicographically once registered.
    pub aliases: Vec<String>,
    /// Driver name presented instead of `driver` (wire-compatible variants).
    pub override_driver: Option<String>,
    /// Driver name used when opening, if it differs from the exposed one.
    pub open_as: Option<String>,
}

impl Scheme {
    /// Create a scheme with no transports, no aliases and authority syntax.
    pub fn new(driver: impl Into<String>, generator: Generator) -> Self {
        Self {
            driver: driver.into(),
            generator,
            transport: Transport::NONE,
            opaque: false,
            aliases: Vec::new(),
            override_driver: None,
            open_as: None,
        }
    }

    /// Set the permitted transports.
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Mark the scheme as taking opaque input.
    pub fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }

    /// Add aliases.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Present as a different driver.
    pub fn with_override(mut self, driver: impl Into<String>) -> Self {
        self.override_driver = Some(driver.into());
        self
    }

    /// Open with a different driver name.
    pub fn with_open_as(mut self, driver: impl Into<String>) -> Self {
        self.open_as = Some(driver.into());
        self
    }

    /// The driver name exposed by parsed URLs.
    pub fn exposed_driver(&self) -> &str {
        self.override_driver.as_deref().unwrap_or(&self.driver)
    }

    /// The shortest alias, or the driver when there are none.
    pub fn primary_alias(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or(&self.driver)
    }
}

fn template(driver: &str, url: &str) -> DburlResult<Scheme> {
    Ok(Scheme::new(driver, Generator::Template(Template::parse(url)?)))
}

fn passthrough(driver: &str, scheme: &str) -> Scheme {
    Scheme::new(
        driver,
        Generator::Passthrough {
            scheme: scheme.to_string(),
        },
    )
}

/// The built-in schemes.
pub fn base_schemes() -> DburlResult<Vec<Scheme>> {
    let network = Transport::TCP | Transport::UDP | Transport::UNIX;
    let mysql = Generator::Socket(SocketStyle::MySql);

    Ok(vec![
        // core
        Scheme::new("mysql", mysql.clone())
            .with_transport(network)
            .with_aliases(["mariadb", "maria", "percona", "aurora"]),
        Scheme::new("oracle", Generator::Positional(PositionalStyle::Oracle))
            .with_aliases(["ora", "oci", "oci8", "odpi"]),
        Scheme::new("postgres", Generator::Socket(SocketStyle::Postgres))
            .with_transport(Transport::UNIX)
            .with_aliases(["pg", "postgresql", "pgsql"]),
        Scheme::new("sqlite3", Generator::File(FileStyle::Opaque))
            .opaque()
            .with_aliases(["sqlite"]),
        Scheme::new("sqlserver", Generator::KeyValue(KeyValueStyle::SqlServer))
            .with_aliases(["ms", "mssql", "azuresql"]),
        // file engines
        Scheme::new(
            "file",
            Generator::File(FileStyle::Sniff {
                default: "sqlite3".to_string(),
            }),
        )
        .opaque(),
        Scheme::new("duckdb", Generator::File(FileStyle::Opaque))
            .opaque()
            .with_aliases(["dk", "ddb", "duck"]),
        Scheme::new("moderncsqlite", Generator::File(FileStyle::Opaque))
            .opaque()
            .with_aliases(["mq", "modernsqlite"])
            .with_open_as("sqlite"),
        Scheme::new("ql", Generator::File(FileStyle::Opaque))
            .opaque()
            .with_aliases(["ql", "cznic", "cznicql"]),
        // wire compatible
        template("cockroachdb", "postgres://localhost:26257/?sslmode=disable")?
            .with_override("postgres")
            .with_aliases(["cr", "cockroach", "crdb", "cdb"]),
        template("redshift", "postgres://localhost:5439/")?
            .with_override("postgres")
            .with_aliases(["rs"]),
        Scheme::new("tidb", mysql.clone()).with_override("mysql"),
        Scheme::new("vitess", mysql.clone())
            .with_override("mysql")
            .with_aliases(["vt"]),
        Scheme::new("memsql", mysql).with_override("mysql"),
        // others
        Scheme::new("mymysql", Generator::Socket(SocketStyle::MyMySql))
            .with_transport(network)
            .with_aliases(["zm", "mymy"]),
        template("pgx", "postgres://localhost:5432/")?.with_aliases(["px"]),
        Scheme::new("godror", Generator::Positional(PositionalStyle::Godror))
            .with_aliases(["gr"]),
        Scheme::new("adodb", Generator::KeyValue(KeyValueStyle::Adodb)).with_aliases(["ado"]),
        Scheme::new("oleodbc", Generator::KeyValue(KeyValueStyle::OleOdbc))
            .with_transport(Transport::ANY)
            .with_override("adodb")
            .with_aliases(["oo", "ole"]),
        Scheme::new("odbc", Generator::KeyValue(KeyValueStyle::Odbc))
            .with_transport(Transport::ANY),
        Scheme::new("sqlany", Generator::KeyValue(KeyValueStyle::Sybase))
            .with_aliases(["sy", "sybase", "any"]),
        template("avatica", "http://localhost:8765/")?.with_aliases(["phoenix"]),
        template("clickhouse", "clickhouse://localhost:9000/")?.with_aliases(["ch"]),
        Scheme::new("firebirdsql", Generator::Positional(PositionalStyle::Firebird))
            .with_aliases(["fb", "firebird"]),
        passthrough("hdb", "hdb").with_aliases(["sa", "saphana", "sap", "hana"]),
        template("n1ql", "http://localhost:8093/")?.with_aliases(["couchbase"]),
        passthrough("spanner", "spanner").with_aliases(["sp"]),
        passthrough("bigquery", "bigquery").with_aliases(["bq"]),
        template("vertica", "vertica://localhost:5433/")?,
        Scheme::new("voltdb", Generator::Positional(PositionalStyle::VoltDb))
            .with_aliases(["volt", "vdb"]),
        Scheme::new("yql", Generator::Positional(PositionalStyle::Yql)),
    ])
}
