//! `dburl short` command - Print a password-free summary of a URL.

use dburl::Parser;

use crate::cli::UrlArgs;
use crate::error::CliResult;

/// Run the short command
pub fn run(args: UrlArgs, parser: &Parser) -> CliResult<()> {
    let url = parser.parse(&args.url)?;
    println!("{}", url.short());
    Ok(())
}
