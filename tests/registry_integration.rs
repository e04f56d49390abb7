//! Registry extension tests through the public API.

use dburl::dsn::{FileStyle, Generator, KeyValueStyle, SocketStyle, Template};
use dburl::{DburlError, Parser, Registry, RegistryError, Scheme, Transport};
use pretty_assertions::assert_eq;

#[test]
fn test_every_alias_parses_to_the_same_driver() {
    let registry = Registry::base().unwrap();
    let parser = Parser::new(Registry::base().unwrap());

    for scheme in registry.schemes() {
        if scheme.opaque {
            continue;
        }
        let by_driver = parser.parse(&format!("{}://", scheme.driver));
        for alias in &scheme.aliases {
            let by_alias = parser.parse(&format!("{}://", alias));
            match (&by_driver, &by_alias) {
                (Ok(a), Ok(b)) => {
                    assert_eq!(a.driver(), b.driver(), "{}", alias);
                    assert_eq!(a.dsn(), b.dsn(), "{}", alias);
                }
                (Err(a), Err(b)) => assert_eq!(a.kind(), b.kind(), "{}", alias),
                _ => panic!("{} and {} disagree", scheme.driver, alias),
            }
        }
    }
}

#[test]
fn test_register_custom_scheme() {
    let mut registry = Registry::base().unwrap();
    registry
        .register(
            Scheme::new("yugabyte", Generator::Socket(SocketStyle::Postgres))
                .with_transport(Transport::UNIX)
                .with_override("postgres")
                .with_aliases(["yb", "ysql"]),
        )
        .unwrap();

    let parser = Parser::new(registry);
    let url = parser.parse("ysql://admin@node1:5433/app").unwrap();
    assert_eq!(url.driver(), "postgres");
    assert_eq!(url.unaliased_driver(), "yugabyte");
    assert_eq!(url.dsn(), "dbname=app host=node1 port=5433 user=admin");
    assert_eq!(url.short(), "yb:admin@node1:5433/app");
}

#[test]
fn test_register_template_scheme() {
    let template = Template::parse("mysql://localhost:4000/").unwrap();
    let mut registry = Registry::new();
    registry
        .register(Scheme::new("tidbcloud", Generator::Template(template)).with_aliases(["tc"]))
        .unwrap();

    let url = Parser::new(registry).parse("tc://user@gateway/db").unwrap();
    assert_eq!(url.dsn(), "mysql://user@gateway:4000/db");
}

#[test]
fn test_registration_failures_leave_registry_unchanged() {
    let mut registry = Registry::base().unwrap();
    let before = registry.len();

    assert_eq!(
        registry.register(
            Scheme::new("newdb", Generator::KeyValue(KeyValueStyle::SqlServer))
                .with_aliases(["pg"])
        ),
        Err(RegistryError::DuplicateAlias("pg".into()))
    );
    assert_eq!(
        registry.register(Scheme::new("x", Generator::File(FileStyle::Opaque))),
        Err(RegistryError::InvalidDriver("x".into()))
    );
    assert_eq!(registry.len(), before);
    assert!(!registry.contains("newdb"));
}

#[test]
fn test_unregister_then_parse() {
    let mut registry = Registry::base().unwrap();
    let removed = registry.unregister("my").unwrap();
    assert_eq!(removed.driver, "mysql");

    let parser = Parser::new(registry);
    assert_eq!(
        parser.parse("mysql://localhost/db"),
        Err(DburlError::UnknownScheme("mysql".into()))
    );
    assert_eq!(
        parser.parse("maria://localhost/db"),
        Err(DburlError::UnknownScheme("maria".into()))
    );
}

#[test]
fn test_register_alias() {
    let mut registry = Registry::base().unwrap();
    registry.register_alias("postgres", "timescale").unwrap();
    assert_eq!(
        registry.register_alias("nosuch", "ns"),
        Err(RegistryError::UnknownScheme("nosuch".into()))
    );

    let url = Parser::new(registry).parse("timescale://localhost/metrics").unwrap();
    assert_eq!(url.driver(), "postgres");
}

#[test]
fn test_protocols_lists_driver_and_aliases() {
    let registry = Registry::base().unwrap();
    let protocols = registry.protocols("pg");
    assert_eq!(protocols[0], "postgres");
    assert!(protocols.contains(&"pgsql".to_string()));
    assert!(registry.protocols("nosuch").is_empty());
}
