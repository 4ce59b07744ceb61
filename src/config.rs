//! Run configuration: built-in defaults, `.env`/environment overrides, and
//! whatever the command line sets on top.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::adapters::live::geocoder::DEFAULT_NOMINATIM_URL;
use crate::osm::extract::GeoKeyMode;
use crate::ports::Coordinates;

/// Default permit CSV.
pub const DEFAULT_RECORDS_PATH: &str = "data.csv";
/// Default OSM export.
pub const DEFAULT_OSM_PATH: &str = "data.xml";
/// Default annotated OSM output.
pub const DEFAULT_OUTPUT_PATH: &str = "portland_dwelling_units.osm";
/// Default rendered map.
pub const DEFAULT_MAP_PATH: &str = "map.html";
/// Most markers placed on one map.
pub const DEFAULT_MAX_MARKERS: usize = 600;
/// Initial zoom of the rendered map.
pub const DEFAULT_ZOOM: u8 = 12;
/// Initial center of the rendered map (Portland, OR).
pub const DEFAULT_CENTER: Coordinates = Coordinates::new(45.508512, -122.649411);

const DEFAULT_USER_AGENT: &str = concat!("dwellmap/", env!("CARGO_PKG_VERSION"));
const DEFAULT_GEOCODE_INTERVAL: Duration = Duration::from_millis(1000);

/// Everything a `merge` run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Permit CSV to read.
    pub records_path: PathBuf,
    /// OSM XML to read.
    pub osm_path: PathBuf,
    /// Where the annotated OSM document goes.
    pub output_path: PathBuf,
    /// Where the rendered map goes.
    pub map_path: PathBuf,
    /// Initial map center.
    pub map_center: Coordinates,
    /// Initial map zoom.
    pub zoom: u8,
    /// Cap on geocoded markers.
    pub max_markers: usize,
    /// Nominatim base URL.
    pub geocoder_url: String,
    /// `User-Agent` sent to the geocoder.
    pub user_agent: String,
    /// Minimum spacing between geocoder requests.
    pub geocode_interval: Duration,
    /// How OSM addresses become join keys.
    pub geo_key_mode: GeoKeyMode,
    /// Geocode and render the map after reconciling.
    pub publish_map: bool,
    /// Open the rendered map in a browser.
    pub open_map: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from(DEFAULT_RECORDS_PATH),
            osm_path: PathBuf::from(DEFAULT_OSM_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            map_center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            max_markers: DEFAULT_MAX_MARKERS,
            geocoder_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            geocode_interval: DEFAULT_GEOCODE_INTERVAL,
            geo_key_mode: GeoKeyMode::default(),
            publish_map: true,
            open_map: true,
        }
    }
}

impl Config {
    /// Defaults overridden by a `.env` file and `DWELLMAP_*` variables.
    ///
    /// Recognized: `DWELLMAP_GEOCODER_URL`, `DWELLMAP_USER_AGENT`,
    /// `DWELLMAP_GEOCODE_INTERVAL_MS`, `DWELLMAP_MAX_MARKERS`.
    #[must_use]
    pub fn from_env() -> Self {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("DWELLMAP_GEOCODER_URL") {
            config.geocoder_url = url;
        }
        if let Some(agent) = lookup("DWELLMAP_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(ms) = parse_var(&lookup, "DWELLMAP_GEOCODE_INTERVAL_MS") {
            config.geocode_interval = Duration::from_millis(ms);
        }
        if let Some(max) = parse_var(&lookup, "DWELLMAP_MAX_MARKERS") {
            config.max_markers = max;
        }
        config
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
