//! Recording adapter for the `Geocoder` port.

use serde::Serialize;

use super::{record_result, SharedRecorder};
use crate::ports::{GeocodeFuture, Geocoder};

/// Records geocoding lookups while delegating to an inner implementation.
pub struct RecordingGeocoder {
    inner: Box<dyn Geocoder>,
    recorder: SharedRecorder,
}

impl RecordingGeocoder {
    /// Wraps `inner`, logging into `recorder`.
    pub fn new(inner: Box<dyn Geocoder>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct QueryInput<'a> {
    query: &'a str,
}

impl Geocoder for RecordingGeocoder {
    fn geocode(&self, query: &str) -> GeocodeFuture<'_> {
        let query = query.to_string();

        Box::pin(async move {
            let result = self.inner.geocode(&query).await;
            let input = QueryInput { query: &query };
            record_result(&self.recorder, "geocoder", "geocode", &input, &result);
            result
        })
    }
}
