//! dburl - Command-line interface for parsing database URLs.

use clap::Parser;

use dburl::logging;
use dburl_cli::cli::{Cli, Command};
use dburl_cli::commands;
use dburl_cli::config;
use dburl_cli::error::CliResult;
use dburl_cli::output;

fn main() {
    if let Err(e) = run() {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    if cli.verbose {
        logging::init_debug();
    } else {
        logging::init();
    }

    let parser = config::load_parser(cli.config.as_deref())?;

    match cli.command {
        Command::Parse(args) => commands::parse::run(args, &parser),
        Command::Normalize(args) => commands::normalize::run(args, &parser),
        Command::Short(args) => commands::short::run(args, &parser),
        Command::Schemes(args) => commands::schemes::run(args, &parser),
        Command::Version => commands::version::run(&parser),
    }
}
