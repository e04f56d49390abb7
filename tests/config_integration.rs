//! Integration tests for registry configuration files.

use std::fs;

use dburl::{DburlError, ErrorKind, Parser, Registry, RegistryConfig, RegistryError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn apply(toml: &str) -> Result<Registry, DburlError> {
    let mut registry = Registry::base()?;
    RegistryConfig::from_toml(toml)?.apply(&mut registry)?;
    Ok(registry)
}

/// Test loading a configuration from disk
#[test]
fn test_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dburl.toml");
    fs::write(
        &path,
        r#"
        [[scheme]]
        driver = "materialize"
        generator = "template:postgres://localhost:6875/materialize"
        aliases = ["mz"]
        override = "postgres"
        "#,
    )
    .unwrap();

    let config = RegistryConfig::from_file(&path).unwrap();
    let mut registry = Registry::base().unwrap();
    config.apply(&mut registry).unwrap();

    let url = Parser::new(registry).parse("mz://user@mzhost/").unwrap();
    assert_eq!(url.driver(), "postgres");
    assert_eq!(url.dsn(), "postgres://user@mzhost:6875/");
}

/// Test a missing configuration file
#[test]
fn test_config_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = RegistryConfig::from_file(temp_dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

/// Test every generator name is accepted
#[test]
fn test_config_generator_names() {
    for (i, generator) in [
        "postgres", "mysql", "mymysql", "sqlserver", "sybase", "adodb", "odbc", "oleodbc",
        "oracle", "godror", "firebird", "yql", "voltdb", "opaque", "sniff", "sniff:duckdb",
        "passthrough:custom",
    ]
    .iter()
    .enumerate()
    {
        let toml = format!(
            "[[scheme]]\ndriver = \"custom{}\"\ngenerator = \"{}\"\naliases = [\"x{}\"]\n",
            i,
            generator,
            (b'a' + i as u8) as char
        );
        assert!(apply(&toml).is_ok(), "{}", generator);
    }
}

/// Test unknown generator names
#[test]
fn test_config_unknown_generator() {
    let err = apply(
        r#"
        [[scheme]]
        driver = "custom"
        generator = "telepathy"
        "#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

/// Test a malformed template is an error, not a panic
#[test]
fn test_config_bad_template() {
    let err = apply(
        r#"
        [[scheme]]
        driver = "custom"
        generator = "template:no scheme here"
        "#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

/// Test transports from configuration are enforced
#[test]
fn test_config_transports() {
    let registry = apply(
        r#"
        [[scheme]]
        driver = "tcponly"
        generator = "mysql"
        transports = ["tcp"]
        "#,
    )
    .unwrap();
    let parser = Parser::new(registry);

    assert_eq!(
        parser.parse("tcponly+tcp://h/db").unwrap().dsn(),
        "tcp(h:3306)/db"
    );
    assert!(matches!(
        parser.parse("tcponly+udp://h/db"),
        Err(DburlError::InvalidTransport { .. })
    ));
}

/// Test registration errors surface from apply
#[test]
fn test_config_duplicate_scheme() {
    assert_eq!(
        apply(
            r#"
            [[scheme]]
            driver = "postgres"
            generator = "postgres"
            "#,
        )
        .unwrap_err(),
        DburlError::Registry(RegistryError::DuplicateScheme("postgres".into()))
    );
}

/// Test unregistering then re-registering a driver
#[test]
fn test_config_replace_builtin() {
    let registry = apply(
        r#"
        unregister = ["clickhouse"]

        [[scheme]]
        driver = "clickhouse"
        generator = "template:clickhouse://localhost:8123/"
        aliases = ["ch"]
        "#,
    )
    .unwrap();

    let url = Parser::new(registry).parse("ch://").unwrap();
    assert_eq!(url.dsn(), "clickhouse://localhost:8123/");
}
