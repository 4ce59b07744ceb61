//! Browser port for showing a rendered map to the user.

use std::path::Path;

use super::PortError;

/// Opens local files in the user's viewer.
pub trait Browser: Send + Sync {
    /// Opens `path` for viewing without waiting for the viewer to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if no viewer could be launched.
    fn open(&self, path: &Path) -> Result<(), PortError>;
}
