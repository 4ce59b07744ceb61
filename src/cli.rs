//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `dwellmap`.
#[derive(Debug, Parser)]
#[command(
    name = "dwellmap",
    version,
    about = "Merge dwelling-unit permit records into OpenStreetMap addresses"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Annotate OSM elements with dwelling units and map the matches.
    Merge(MergeArgs),
    /// Print the canonical form of each address.
    Normalize {
        /// Addresses to normalize.
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

/// Options for `merge`. Unset paths fall back to the configured defaults.
#[derive(Debug, Default, Args)]
pub struct MergeArgs {
    /// Permit CSV (address in column 1, dwelling units in column 3).
    #[arg(long, value_name = "CSV")]
    pub records: Option<PathBuf>,
    /// OSM XML export to annotate.
    #[arg(long, value_name = "XML")]
    pub osm: Option<PathBuf>,
    /// Where to write the annotated OSM document.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Where to write the HTML map.
    #[arg(long, value_name = "FILE")]
    pub map: Option<PathBuf>,
    /// Most addresses to geocode onto the map.
    #[arg(long, value_name = "N")]
    pub max_markers: Option<usize>,
    /// Run OSM addresses through the full normalizer before matching.
    #[arg(long)]
    pub normalize_geo: bool,
    /// Skip geocoding and the map entirely.
    #[arg(long)]
    pub no_map: bool,
    /// Write the map but do not open it.
    #[arg(long)]
    pub no_open: bool,
}
