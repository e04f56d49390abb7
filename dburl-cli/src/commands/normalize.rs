//! `dburl normalize` command - Print the normalized form of a URL.

use dburl::Parser;

use crate::cli::NormalizeArgs;
use crate::error::CliResult;

/// Run the normalize command
pub fn run(args: NormalizeArgs, parser: &Parser) -> CliResult<()> {
    let url = parser.parse(&args.target.url)?;
    println!("{}", url.normalize(&args.sep, &args.empty, args.cut));
    Ok(())
}
