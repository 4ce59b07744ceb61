//! Filesystem port for reading sources and writing outputs.

use std::path::Path;

use super::PortError;

/// Reads input documents and writes generated ones.
///
/// Both sources are read whole and both outputs are written whole, so the
/// port never hands out an open file.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes `contents` to `path`, creating parent directories and
    /// replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;
}
