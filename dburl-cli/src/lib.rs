//! dburl CLI library.
//!
//! Parses database URLs from the command line and prints the driver, DSN
//! and related views of them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
