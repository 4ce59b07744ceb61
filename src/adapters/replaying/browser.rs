//! Replaying adapter for the `Browser` port.

use std::path::Path;

use super::{replay, SharedReplayer};
use crate::ports::{Browser, PortError};

/// Acknowledges browser launches from a cassette.
pub struct ReplayingBrowser {
    replayer: SharedReplayer,
}

impl ReplayingBrowser {
    /// Creates a replaying browser from a shared replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl Browser for ReplayingBrowser {
    fn open(&self, _path: &Path) -> Result<(), PortError> {
        replay(&self.replayer, "browser", "open")
    }
}
