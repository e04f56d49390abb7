//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// dburl - Parse database URLs into driver connection strings
#[derive(Parser, Debug)]
#[command(name = "dburl")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Parse database URLs into driver connection strings", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Registry configuration file (TOML)
    #[arg(short, long, global = true, env = "DBURL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a URL and show its driver and DSN
    Parse(ParseArgs),

    /// Print the normalized form of a URL
    Normalize(NormalizeArgs),

    /// Print a password-free summary of a URL
    Short(UrlArgs),

    /// List registered schemes
    Schemes(SchemesArgs),

    /// Display version information
    Version,
}

// =============================================================================
// Shared arguments
// =============================================================================

/// The URL to operate on
#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Database URL
    #[arg(env = "DATABASE_URL")]
    pub url: String,
}

// =============================================================================
// Parse command
// =============================================================================

/// Arguments for the `parse` command
#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub target: UrlArgs,

    /// Print JSON instead of styled text
    #[arg(long)]
    pub json: bool,
}

// =============================================================================
// Normalize command
// =============================================================================

/// Arguments for the `normalize` command
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub target: UrlArgs,

    /// Field separator
    #[arg(long, default_value = ":")]
    pub sep: String,

    /// Replacement for blank fields
    #[arg(long, default_value = "")]
    pub empty: String,

    /// Drop trailing blank fields, keeping at least this many (0 keeps all)
    #[arg(long, default_value_t = 0)]
    pub cut: usize,
}

// =============================================================================
// Schemes command
// =============================================================================

/// Arguments for the `schemes` command
#[derive(Args, Debug)]
pub struct SchemesArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
