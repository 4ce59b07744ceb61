//! Replaying adapters: answer port calls from a cassette.

pub mod browser;
pub mod filesystem;
pub mod geocoder;

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;

use crate::cassette::CassetteReplayer;
use crate::ports::PortError;

pub use browser::ReplayingBrowser;
pub use filesystem::ReplayingFileSystem;
pub use geocoder::ReplayingGeocoder;

/// Shared handle to the replayer used by every replaying adapter.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Pops the next recorded `port::method` call and decodes its result.
///
/// Expects `{"ok": v}` or `{"err": "message"}`. A missing or exhausted
/// recording comes back as an error rather than a panic.
pub(crate) fn replay<T: DeserializeOwned>(
    replayer: &SharedReplayer,
    port: &str,
    method: &str,
) -> Result<T, PortError> {
    let interaction = replayer
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .next_interaction(port, method)?;
    let output = interaction.output;

    if let Some(err) = output.get("err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string().into());
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value)
        .map_err(|e| format!("{port}::{method}: failed to decode recorded output: {e}").into())
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use serde_json::json;

    use super::SharedReplayer;
    use crate::cassette::{Cassette, CassetteReplayer, Interaction};

    /// Builds a replayer from `(port, method, output)` triples.
    pub(crate) fn replayer(calls: &[(&str, &str, serde_json::Value)]) -> SharedReplayer {
        let interactions = calls
            .iter()
            .zip(0..)
            .map(|((port, method, output), seq)| Interaction {
                seq,
                port: (*port).to_string(),
                method: (*method).to_string(),
                input: json!({}),
                output: output.clone(),
            })
            .collect();
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.0.0".into(),
            interactions,
        };
        std::sync::Arc::new(std::sync::Mutex::new(CassetteReplayer::new(&cassette)))
    }
}
