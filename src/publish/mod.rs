//! Geocodes matched addresses and publishes them as an HTML map.

pub mod leaflet;

use std::path::PathBuf;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::ports::Coordinates;
use crate::reconcile::MatchedElements;

pub use leaflet::{LeafletMap, Marker};

/// What a publish run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    /// Where the map page was written.
    pub path: PathBuf,
    /// Addresses sent to the geocoder.
    pub attempted: usize,
    /// Markers placed on the map.
    pub placed: usize,
}

/// Geocodes up to `config.max_markers` matches, renders them onto a map
/// centered on `config.map_center`, writes it to `config.map_path`, and
/// opens it unless `config.open_map` is off.
///
/// Addresses the geocoder does not know are skipped. A browser that fails
/// to start is logged and otherwise ignored.
///
/// # Errors
///
/// Returns [`Error::Geocode`] when the geocoding service fails outright and
/// [`Error::Io`] when the map cannot be written.
pub async fn publish(
    ctx: &ServiceContext,
    matched: &MatchedElements,
    config: &Config,
) -> Result<Published> {
    let mut map = LeafletMap::new(config.map_center, config.zoom);
    let mut attempted = 0;

    for (element, address) in matched.iter().take(config.max_markers) {
        attempted += 1;
        match locate(ctx, address.as_str()).await {
            Ok(position) => {
                debug!(%element, %address, lat = position.lat, lon = position.lon, "placed");
                map.add_marker(position, format!("{address}\n({element})"));
            }
            Err(Error::NotFound(_)) => {
                debug!(%element, %address, "geocoder has no result; skipping");
            }
            Err(e) => return Err(e),
        }
    }
    if matched.len() > attempted {
        info!(skipped = matched.len() - attempted, cap = config.max_markers, "marker cap reached");
    }

    let map_id = format!("map_{}", Uuid::new_v4().simple());
    let path = config.map_path.clone();
    ctx.fs.write(&path, &map.render(&map_id)).map_err(|e| Error::io(&path, e))?;
    info!(placed = map.markers.len(), attempted, path = %path.display(), "wrote map");

    if config.open_map {
        if let Err(e) = ctx.browser.open(&path) {
            warn!(path = %path.display(), error = %e, "could not open map in browser");
        }
    }

    Ok(Published { path, attempted, placed: map.markers.len() })
}

/// Geocodes one address; an unknown address is [`Error::NotFound`].
async fn locate(ctx: &ServiceContext, address: &str) -> Result<Coordinates> {
    ctx.geocoder
        .geocode(address)
        .await
        .map_err(|e| Error::Geocode { query: address.to_string(), message: e.to_string() })?
        .ok_or_else(|| Error::NotFound(format!("location of {address:?}")))
}
