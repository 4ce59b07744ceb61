//! Live adapter for the `Geocoder` port using the Nominatim search API.

use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::time::Instant;

use crate::ports::{Coordinates, GeocodeFuture, Geocoder, PortError};

/// Public Nominatim endpoint.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Live geocoder backed by a Nominatim server.
///
/// Requests are spaced at least `min_interval` apart; the public server
/// allows one request per second.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    user_agent: String,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocoder {
    /// Creates a geocoder talking to `base_url`.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
        min_interval: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Time to wait before the next request may go out.
    fn wait_time(&self) -> Duration {
        let mut last = self.last_request.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let now = Instant::now();
        let wait = last.map_or(Duration::ZERO, |prev| {
            self.min_interval.saturating_sub(now.saturating_duration_since(prev))
        });
        *last = Some(now + wait);
        wait
    }
}

/// One search hit. Nominatim returns coordinates as strings.
#[derive(Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl Place {
    fn coordinates(&self) -> Result<Coordinates, PortError> {
        let lat =
            self.lat.parse::<f64>().map_err(|e| format!("bad latitude {:?}: {e}", self.lat))?;
        let lon =
            self.lon.parse::<f64>().map_err(|e| format!("bad longitude {:?}: {e}", self.lon))?;
        Ok(Coordinates::new(lat, lon))
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> GeocodeFuture<'_> {
        let query = query.to_string();

        Box::pin(async move {
            let wait = self.wait_time();
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }

            let response = self
                .client
                .get(format!("{}/search", self.base_url))
                .header(reqwest::header::USER_AGENT, &self.user_agent)
                .query(&[("q", query.as_str()), ("format", "json"), ("limit", "1")])
                .send()
                .await
                .map_err(|e| -> PortError { format!("Nominatim request failed: {e}").into() })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| -> PortError {
                format!("Failed to read Nominatim response: {e}").into()
            })?;
            if !status.is_success() {
                return Err(format!("Nominatim error ({}): {body}", status.as_u16()).into());
            }

            let places: Vec<Place> = serde_json::from_str(&body).map_err(|e| -> PortError {
                format!("Failed to parse Nominatim response: {e}").into()
            })?;
            places.first().map(Place::coordinates).transpose()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_coordinates() {
        let places: Vec<Place> =
            serde_json::from_str(r#"[{"lat":"45.5231","lon":"-122.6765","display_name":"x"}]"#)
                .unwrap();
        let coords = places[0].coordinates().unwrap();
        assert!((coords.lat - 45.5231).abs() < 1e-9);
        assert!((coords.lon + 122.6765).abs() < 1e-9);
    }

    #[test]
    fn rejects_garbage_coordinates() {
        let place = Place { lat: "north".into(), lon: "0".into() };
        assert!(place.coordinates().is_err());
    }

    #[test]
    fn first_request_does_not_wait() {
        let geocoder =
            NominatimGeocoder::new(DEFAULT_NOMINATIM_URL, "test", Duration::from_secs(1));
        assert_eq!(geocoder.wait_time(), Duration::ZERO);
        assert!(geocoder.wait_time() > Duration::ZERO);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let geocoder = NominatimGeocoder::new("http://localhost:8080/", "test", Duration::ZERO);
        assert_eq!(geocoder.base_url, "http://localhost:8080");
    }
}
