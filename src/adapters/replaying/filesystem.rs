//! Replaying adapter for the `FileSystem` port.

use std::path::Path;

use super::{replay, SharedReplayer};
use crate::ports::{FileSystem, PortError};

/// Serves recorded file reads and acknowledges writes without touching disk.
pub struct ReplayingFileSystem {
    replayer: SharedReplayer,
}

impl ReplayingFileSystem {
    /// Creates a replaying filesystem from a shared replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        replay(&self.replayer, "fs", "read_to_string")
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        replay(&self.replayer, "fs", "write")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapters::replaying::test_support::replayer;

    #[test]
    fn serves_recorded_contents() {
        let fs = ReplayingFileSystem::new(replayer(&[(
            "fs",
            "read_to_string",
            json!({"ok": "address,permit,units\n"}),
        )]));
        assert_eq!(fs.read_to_string(Path::new("data.csv")).unwrap(), "address,permit,units\n");
    }

    #[test]
    fn serves_recorded_errors() {
        let fs = ReplayingFileSystem::new(replayer(&[(
            "fs",
            "read_to_string",
            json!({"err": "No such file or directory"}),
        )]));
        let err = fs.read_to_string(Path::new("data.csv")).unwrap_err();
        assert!(err.to_string().contains("No such file"));
    }

    #[test]
    fn write_acknowledges_without_disk() {
        let fs = ReplayingFileSystem::new(replayer(&[("fs", "write", json!({"ok": null}))]));
        assert!(fs.write(Path::new("/nonexistent/dir/out.osm"), "<osm/>").is_ok());
    }

    #[test]
    fn exhausted_cassette_is_an_error_not_a_panic() {
        let fs = ReplayingFileSystem::new(replayer(&[]));
        assert!(fs.read_to_string(Path::new("data.csv")).is_err());
    }
}
