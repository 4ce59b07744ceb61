//! Core library entry for the `dwellmap` CLI.
//!
//! Normalizes street addresses, joins a dwelling-unit permit CSV against an
//! OpenStreetMap export, writes the matches back as `dwelling_units` tags,
//! and publishes the matched addresses on a map.

pub mod adapters;
pub mod address;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod osm;
pub mod ports;
pub mod publish;
pub mod reconcile;
pub mod records;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version are not failures.
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}
