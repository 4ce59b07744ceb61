//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::{FileSystem, PortError};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents_and_reads_back() {
        let dir = std::env::temp_dir().join("dwellmap_live_fs_test");
        let path = dir.join("nested").join("out.osm");

        LiveFileSystem.write(&path, "<osm/>").unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "<osm/>");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("dwellmap_definitely_missing.csv");
        assert!(LiveFileSystem.read_to_string(&path).is_err());
    }
}
