//! Recording adapter for the `Browser` port.

use std::path::Path;

use serde::Serialize;

use super::{record_result, SharedRecorder};
use crate::ports::{Browser, PortError};

/// Records browser launches while delegating to an inner implementation.
pub struct RecordingBrowser {
    inner: Box<dyn Browser>,
    recorder: SharedRecorder,
}

impl RecordingBrowser {
    /// Wraps `inner`, logging into `recorder`.
    pub fn new(inner: Box<dyn Browser>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput<'a> {
    path: &'a str,
}

impl Browser for RecordingBrowser {
    fn open(&self, path: &Path) -> Result<(), PortError> {
        let result = self.inner.open(path);
        let input = PathInput { path: &path.display().to_string() };
        record_result(&self.recorder, "browser", "open", &input, &result);
        result
    }
}
