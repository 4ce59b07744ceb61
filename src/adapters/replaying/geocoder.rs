//! Replaying adapter for the `Geocoder` port.

use super::{replay, SharedReplayer};
use crate::ports::{Coordinates, GeocodeFuture, Geocoder};

/// Serves recorded geocoding answers from a cassette.
pub struct ReplayingGeocoder {
    replayer: SharedReplayer,
}

impl ReplayingGeocoder {
    /// Creates a replaying geocoder from a shared replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl Geocoder for ReplayingGeocoder {
    fn geocode(&self, _query: &str) -> GeocodeFuture<'_> {
        let result = replay::<Option<Coordinates>>(&self.replayer, "geocoder", "geocode");
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapters::replaying::test_support::replayer;

    #[tokio::test]
    async fn serves_hits_and_misses_in_order() {
        let geocoder = ReplayingGeocoder::new(replayer(&[
            ("geocoder", "geocode", json!({"ok": {"lat": 45.5, "lon": -122.6}})),
            ("geocoder", "geocode", json!({"ok": null})),
        ]));

        assert_eq!(
            geocoder.geocode("100 main street").await.unwrap(),
            Some(Coordinates::new(45.5, -122.6))
        );
        assert_eq!(geocoder.geocode("1 nowhere lane").await.unwrap(), None);
    }

    #[tokio::test]
    async fn serves_recorded_transport_errors() {
        let geocoder = ReplayingGeocoder::new(replayer(&[(
            "geocoder",
            "geocode",
            json!({"err": "Nominatim request failed: timed out"}),
        )]));
        assert!(geocoder.geocode("100 main street").await.is_err());
    }
}
