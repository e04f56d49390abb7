//! `dburl schemes` command - List registered schemes.

use owo_colors::OwoColorize;
use serde::Serialize;

use dburl::{Parser, Scheme};

use crate::cli::SchemesArgs;
use crate::error::CliResult;
use crate::output;

/// JSON view of a registered scheme.
#[derive(Debug, Serialize)]
pub struct SchemeInfo<'a> {
    pub driver: &'a str,
    pub exposed_driver: &'a str,
    pub generator: &'static str,
    pub transports: Vec<&'static str>,
    pub opaque: bool,
    pub aliases: &'a [String],
}

impl<'a> From<&'a Scheme> for SchemeInfo<'a> {
    fn from(scheme: &'a Scheme) -> Self {
        Self {
            driver: &scheme.driver,
            exposed_driver: scheme.exposed_driver(),
            generator: scheme.generator.style_name(),
            transports: scheme.transport.tokens(),
            opaque: scheme.opaque,
            aliases: &scheme.aliases,
        }
    }
}

/// Run the schemes command
pub fn run(args: SchemesArgs, parser: &Parser) -> CliResult<()> {
    let schemes = parser.registry().schemes();

    if args.json {
        let infos: Vec<SchemeInfo<'_>> = schemes.into_iter().map(SchemeInfo::from).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    output::header("Registered Schemes");
    for scheme in &schemes {
        let mut line = format!(
            "{:<14} {:<12}",
            scheme.driver.bold(),
            scheme.generator.style_name()
        );
        if !scheme.aliases.is_empty() {
            line.push_str(&scheme.aliases.join(", "));
        }
        output::list_item(&line);
    }
    output::newline();
    output::dim(&format!("{} schemes", schemes.len()));

    Ok(())
}
