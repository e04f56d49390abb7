//! `dburl parse` command - Show the driver and DSN for a URL.

use serde::Serialize;

use dburl::{Parser, Url};

use crate::cli::ParseArgs;
use crate::error::CliResult;
use crate::output::{self, kv};

/// JSON view of a parsed URL.
#[derive(Debug, Serialize)]
pub struct ParsedUrl<'a> {
    pub driver: &'a str,
    pub unaliased_driver: &'a str,
    pub open_driver: &'a str,
    pub transport: &'a str,
    pub dsn: &'a str,
    pub original_scheme: &'a str,
    pub short: String,
    pub normalized: String,
}

impl<'a> From<&'a Url> for ParsedUrl<'a> {
    fn from(url: &'a Url) -> Self {
        Self {
            driver: url.driver(),
            unaliased_driver: url.unaliased_driver(),
            open_driver: url.open_driver(),
            transport: url.transport(),
            dsn: url.dsn(),
            original_scheme: url.original_scheme(),
            short: url.short(),
            normalized: url.normalize(":", "", 0),
        }
    }
}

/// Run the parse command
pub fn run(args: ParseArgs, parser: &Parser) -> CliResult<()> {
    let url = parser.parse(&args.target.url)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ParsedUrl::from(&url))?);
        return Ok(());
    }

    output::header("Parsed URL");
    kv("Driver", url.driver());
    if url.unaliased_driver() != url.driver() {
        kv("Scheme driver", url.unaliased_driver());
    }
    if url.open_driver() != url.driver() {
        kv("Open driver", url.open_driver());
    }
    kv("Transport", url.transport());
    kv("Short", &url.short());
    output::newline();

    output::section("DSN");
    println!("  {}", url.dsn());
    output::newline();

    Ok(())
}
