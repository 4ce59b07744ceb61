//! On-disk cassette layout (YAML).

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One call made through a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the whole recording, starting at 0.
    pub seq: u64,
    /// Port name (`fs`, `geocoder`, `browser`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Arguments, as JSON.
    pub input: serde_json::Value,
    /// Result, as JSON. Fallible calls use `{"ok": v}` / `{"err": "msg"}`.
    pub output: serde_json::Value,
}

/// A recorded run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Label for the recording.
    pub name: String,
    /// When recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Version of the tool that made the recording.
    pub version: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Cassette(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Cassette(format!("failed to parse {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_yaml_written_by_hand() {
        let dir = std::env::temp_dir().join("dwellmap_cassette_format_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.cassette.yaml");
        std::fs::write(
            &path,
            r#"name: portland
recorded_at: 2025-03-15T14:30:00Z
version: 0.1.0
interactions:
  - seq: 0
    port: geocoder
    method: geocode
    input: { query: "100 main street" }
    output: { ok: { lat: 45.5, lon: -122.6 } }
"#,
        )
        .unwrap();

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "portland");
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].input, json!({"query": "100 main street"}));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_a_cassette_error() {
        let err = Cassette::load(Path::new("/nonexistent/dwellmap.cassette.yaml")).unwrap_err();
        assert!(matches!(err, Error::Cassette(_)));
    }
}
