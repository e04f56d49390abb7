//! DSNs for drivers that accept unix domain sockets.
//!
//! For the postgres family the socket location is a directory (optionally
//! suffixed with `:port`); for the mysql family it is the socket file
//! itself. Either way the rest of the path is the database name.

use tracing::debug;

use crate::error::{DburlError, DburlResult};
use crate::fs::{Filesystem, join_clean, resolve_dir, resolve_socket};
use crate::url::{Endpoint, Url};

use super::options::{LIBPQ, MYMYSQL, convert_values, gen_options};
use super::{Generated, SocketStyle};

const MYSQL_DEFAULT_HOST: &str = "127.0.0.1";
const MYSQL_DEFAULT_PORT: &str = "3306";

pub(crate) fn generate(
    style: SocketStyle,
    url: &Url,
    fs: &dyn Filesystem,
) -> DburlResult<Generated> {
    match style {
        SocketStyle::Postgres => postgres(url, fs),
        SocketStyle::MySql => Ok(mysql(url, fs)),
        SocketStyle::MyMySql => Ok(mymysql(url, fs)),
    }
}

/// The path to probe: host and path joined, rooted when there is no host.
fn socket_path(url: &Url) -> String {
    let host = url.hostname();
    let dbname = url.path().trim_start_matches('/');
    if host.is_empty() {
        join_clean(&["/", dbname])
    } else {
        join_clean(&[host, dbname])
    }
}

fn postgres(url: &Url, fs: &dyn Filesystem) -> DburlResult<Generated> {
    if url.host() == "." {
        return Err(DburlError::RelativePathNotSupported(url.driver().to_string()));
    }

    let endpoint = if url.transport() == "unix" {
        let (dir, port, dbname) = resolve_dir(fs, &socket_path(url));
        debug!(dir = %dir, port = %port, dbname = %dbname, "resolved socket directory");
        Endpoint::new(dir, port, dbname)
    } else {
        Endpoint::new(
            url.hostname(),
            url.port().map(|p| p.to_string()).unwrap_or_default(),
            url.path().trim_start_matches('/'),
        )
    };

    let mut q = url.query().clone();
    q.set("host", endpoint.host.as_str());
    q.set("port", endpoint.port.as_str());
    q.set("dbname", endpoint.database.as_str());
    if let Some(user) = url.user() {
        q.set("user", user.username.as_str());
        q.set("password", user.password.as_deref().unwrap_or_default());
    }

    Ok(Generated {
        dsn: gen_options(&q, &LIBPQ, &[]),
        open_driver: None,
        endpoint: Some(endpoint),
    })
}

/// Resolve (host, port, dbname) for the mysql family, before defaults.
fn mysql_endpoint(url: &Url, fs: &dyn Filesystem) -> Endpoint {
    if url.transport() == "unix" {
        let (socket, dbname) = resolve_socket(fs, &socket_path(url));
        debug!(socket = %socket, dbname = %dbname, "resolved socket file");
        return Endpoint::new(socket, "", dbname);
    }
    Endpoint::new(
        url.hostname(),
        url.port().map(|p| p.to_string()).unwrap_or_default(),
        url.path().trim_start_matches('/'),
    )
}

/// `host[:port]` with the network defaults applied off unix sockets.
fn mysql_address(url: &Url, endpoint: &Endpoint) -> String {
    if url.transport() == "unix" {
        return endpoint.host.clone();
    }
    let host = match endpoint.host.as_str() {
        "" => MYSQL_DEFAULT_HOST,
        h => h,
    };
    let port = match endpoint.port.as_str() {
        "" => MYSQL_DEFAULT_PORT,
        p => p,
    };
    format!("{}:{}", host, port)
}

/// `user[:pass]@transport(address)/dbname?query`.
fn mysql(url: &Url, fs: &dyn Filesystem) -> Generated {
    let endpoint = mysql_endpoint(url, fs);

    let mut dsn = String::new();
    if let Some(user) = url.user().filter(|u| !u.username.is_empty()) {
        dsn.push_str(&user.username);
        if let Some(pass) = &user.password {
            dsn.push(':');
            dsn.push_str(pass);
        }
        dsn.push('@');
    }
    dsn.push_str(&format!(
        "{}({})/{}",
        url.transport(),
        mysql_address(url, &endpoint),
        endpoint.database
    ));
    dsn.push_str(&url.query().encode_with_prefix());

    Generated {
        dsn,
        open_driver: None,
        endpoint: Some(endpoint),
    }
}

/// `transport:address[,opts]*dbname[/user[/pass]]`.
fn mymysql(url: &Url, fs: &dyn Filesystem) -> Generated {
    let endpoint = mysql_endpoint(url, fs);

    let mut dsn = format!("{}:{}", url.transport(), mysql_address(url, &endpoint));
    dsn.push_str(&gen_options(
        &convert_values(url.query(), "true", ""),
        &MYMYSQL,
        &[],
    ));
    dsn.push('*');
    dsn.push_str(&endpoint.database);

    if let Some(user) = url.user().filter(|u| !u.username.is_empty()) {
        dsn.push('/');
        dsn.push_str(&user.username);
        if let Some(pass) = &user.password {
            dsn.push('/');
            dsn.push_str(pass);
        }
    }

    Generated {
        dsn,
        open_driver: None,
        endpoint: Some(endpoint),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DburlError;
    use crate::fs::MemoryFilesystem;
    use crate::{Parser, Registry};
    use pretty_assertions::assert_eq;

    fn parser() -> Parser {
        Parser::new(Registry::base().unwrap()).with_filesystem(
            MemoryFilesystem::new()
                .with_dir("/var/run/postgresql")
                .with_socket("/var/run/mysqld/mysqld.sock"),
        )
    }

    fn dsn(raw: &str) -> String {
        parser().parse(raw).unwrap().dsn().to_string()
    }

    #[test]
    fn test_postgres_network() {
        assert_eq!(dsn("pg:"), "");
        assert_eq!(dsn("pg://"), "");
        assert_eq!(
            dsn("pg:user:pass@localhost/booktest"),
            "dbname=booktest host=localhost password=pass user=user"
        );
        assert_eq!(
            dsn("postgres://user@db:5433/app?sslmode=disable"),
            "dbname=app host=db port=5433 sslmode=disable user=user"
        );
    }

    #[test]
    fn test_postgres_socket_directory() {
        assert_eq!(dsn("pg:/var/run/postgresql"), "host=/var/run/postgresql");
        assert_eq!(
            dsn("pg:/var/run/postgresql:6666/mydb"),
            "dbname=mydb host=/var/run/postgresql port=6666"
        );
        assert_eq!(
            dsn("pg:/var/run/postgresql/mydb"),
            "dbname=mydb host=/var/run/postgresql"
        );
        assert_eq!(
            dsn("pg:/var/run/postgresql:7777"),
            "host=/var/run/postgresql port=7777"
        );
        assert_eq!(
            dsn("pg+unix:/var/run/postgresql:4444/booktest"),
            "dbname=booktest host=/var/run/postgresql port=4444"
        );
        assert_eq!(
            dsn("pg:user:pass@/var/run/postgresql/mydb"),
            "dbname=mydb host=/var/run/postgresql password=pass user=user"
        );
    }

    #[test]
    fn test_postgres_unresolved_socket() {
        assert_eq!(
            dsn("pg:user:pass@/really/bad/path"),
            "host=/really/bad/path password=pass user=user"
        );
    }

    #[test]
    fn test_postgres_relative_path() {
        assert_eq!(
            parser().parse("pg://./mydb"),
            Err(DburlError::RelativePathNotSupported("postgres".to_string()))
        );
    }

    #[test]
    fn test_mysql() {
        assert_eq!(dsn("my:"), "tcp(127.0.0.1:3306)/");
        assert_eq!(dsn("my://"), "tcp(127.0.0.1:3306)/");
        assert_eq!(
            dsn("my:booktest:booktest@localhost/booktest"),
            "booktest:booktest@tcp(localhost:3306)/booktest"
        );
        assert_eq!(
            dsn("mysql+udp://u@h:3307/db"),
            "u@udp(h:3307)/db"
        );
    }

    #[test]
    fn test_mysql_socket() {
        assert_eq!(
            dsn("my:/var/run/mysqld/mysqld.sock/mydb?timeout=90"),
            "unix(/var/run/mysqld/mysqld.sock)/mydb?timeout=90"
        );
        assert_eq!(
            dsn("my:///var/run/mysqld/mysqld.sock/mydb?timeout=90"),
            "unix(/var/run/mysqld/mysqld.sock)/mydb?timeout=90"
        );
        assert_eq!(
            dsn("my+unix:user:pass@mysqld.sock?timeout=90"),
            "user:pass@unix(mysqld.sock)/?timeout=90"
        );
    }

    #[test]
    fn test_mymysql() {
        assert_eq!(dsn("mymy:"), "tcp:127.0.0.1:3306*");
        assert_eq!(
            dsn("mymy:user:pass@localhost/booktest"),
            "tcp:localhost:3306*booktest/user/pass"
        );
        assert_eq!(
            dsn("mymy:/var/run/mysqld/mysqld.sock/mydb?timeout=90&test=true"),
            "unix:/var/run/mysqld/mysqld.sock,test,timeout=90*mydb"
        );
        assert_eq!(
            dsn("mymy+unix:user:pass@mysqld.sock?timeout=90"),
            "unix:mysqld.sock,timeout=90*/user/pass"
        );
    }

    #[test]
    fn test_wire_compatible_variants() {
        let url = parser().parse("vt://user@vtgate:15306/keyspace").unwrap();
        assert_eq!(url.driver(), "mysql");
        assert_eq!(url.unaliased_driver(), "vitess");
        assert_eq!(url.dsn(), "user@tcp(vtgate:15306)/keyspace");
    }
}
