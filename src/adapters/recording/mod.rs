//! Recording adapters: delegate to an inner port and log every call.

pub mod browser;
pub mod filesystem;
pub mod geocoder;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::cassette::CassetteRecorder;

pub use browser::RecordingBrowser;
pub use filesystem::RecordingFileSystem;
pub use geocoder::RecordingGeocoder;

/// Shared handle to the recorder used by every recording adapter.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Records a fallible call as `{"ok": v}` or `{"err": "message"}`.
///
/// The replaying adapters decode the same shape.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input = serde_json::to_value(input).unwrap_or_default();
    let output = match result {
        Ok(v) => serde_json::json!({ "ok": serde_json::to_value(v).unwrap_or_default() }),
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };

    recorder.lock().unwrap_or_else(PoisonError::into_inner).record(port, method, input, output);
}
