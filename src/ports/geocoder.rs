//! Geocoding port: free-text address → coordinates.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use super::PortError;

/// Boxed future returned by [`Geocoder::geocode`], keeping the trait
/// dyn-compatible.
pub type GeocodeFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<Coordinates>, PortError>> + Send + 'a>>;

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Coordinates {
    /// Builds a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Resolves addresses or place names to coordinates.
pub trait Geocoder: Send + Sync {
    /// Looks up `query`.
    ///
    /// `Ok(None)` means the service answered but knows no such place.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or its answer
    /// cannot be read.
    fn geocode(&self, query: &str) -> GeocodeFuture<'_>;
}
