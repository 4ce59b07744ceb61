//! `dwellmap merge` command: records + OSM → annotated OSM (+ map).

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::cli::MergeArgs;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::osm::extract::{self, GeoKeyMode};
use crate::publish::{self, Published};
use crate::reconcile;
use crate::records;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Usable permit records.
    pub records: usize,
    /// Fully addressed OSM elements.
    pub geo_addresses: usize,
    /// Annotated nodes.
    pub nodes: usize,
    /// Annotated ways.
    pub ways: usize,
    /// Map outcome, if the map was published.
    pub published: Option<Published>,
}

impl Summary {
    /// Elements that matched and were annotated.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.nodes + self.ways
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records, {} OSM addresses, {} matched ({} nodes, {} ways)",
            self.records,
            self.geo_addresses,
            self.matched(),
            self.nodes,
            self.ways
        )?;
        if let Some(p) = &self.published {
            write!(f, "; {} of {} markers placed on {}", p.placed, p.attempted, p.path.display())?;
        }
        Ok(())
    }
}

/// Overlays command-line options on `config`.
#[must_use]
pub fn apply_args(mut config: Config, args: &MergeArgs) -> Config {
    if let Some(path) = &args.records {
        config.records_path.clone_from(path);
    }
    if let Some(path) = &args.osm {
        config.osm_path.clone_from(path);
    }
    if let Some(path) = &args.output {
        config.output_path.clone_from(path);
    }
    if let Some(path) = &args.map {
        config.map_path.clone_from(path);
    }
    if let Some(max) = args.max_markers {
        config.max_markers = max;
    }
    if args.normalize_geo {
        config.geo_key_mode = GeoKeyMode::Normalized;
    }
    if args.no_map {
        config.publish_map = false;
    }
    if args.no_open {
        config.open_map = false;
    }
    config
}

/// Runs the whole pipeline against `ctx`.
///
/// # Errors
///
/// Returns the first fatal error: an unreadable or malformed source, a
/// failed write, or a geocoding failure.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<Summary> {
    let records_text = read(ctx, &config.records_path)?;
    let records = records::extract(&records_text, &source_name(&config.records_path))?;
    info!(records = records.len(), "loaded permit records");

    let osm_name = source_name(&config.osm_path);
    let osm_text = read(ctx, &config.osm_path)?;
    let geo = extract::extract(&osm_text, &osm_name, config.geo_key_mode)?;
    info!(geo_addresses = geo.len(), "found addressed OSM elements");

    let outcome =
        reconcile::reconcile(ctx, &geo, &records, &osm_text, &osm_name, &config.output_path)?;

    let published = if config.publish_map {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Runtime(e.to_string()))?;
        Some(runtime.block_on(publish::publish(ctx, &outcome.matched, config))?)
    } else {
        None
    };

    Ok(Summary {
        records: records.len(),
        geo_addresses: geo.len(),
        nodes: outcome.nodes,
        ways: outcome.ways,
        published,
    })
}

fn read(ctx: &ServiceContext, path: &Path) -> Result<String> {
    ctx.fs.read_to_string(path).map_err(|e| Error::io(path, e))
}

fn source_name(path: &Path) -> String {
    path.display().to_string()
}
