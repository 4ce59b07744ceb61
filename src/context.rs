//! Service context bundling the port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::adapters::live::{LiveBrowser, LiveFileSystem, NominatimGeocoder};
use crate::adapters::recording::{
    RecordingBrowser, RecordingFileSystem, RecordingGeocoder, SharedRecorder,
};
use crate::adapters::replaying::{ReplayingBrowser, ReplayingFileSystem, ReplayingGeocoder};
use crate::cassette::{Cassette, CassetteRecorder, CassetteReplayer};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ports::{Browser, FileSystem, Geocoder};

/// Bundles one implementation of every port.
///
/// Constructors wire up live, recording, or replaying adapters; the
/// pipeline only ever sees the traits.
pub struct ServiceContext {
    /// Filesystem for reading sources and writing outputs.
    pub fs: Box<dyn FileSystem>,
    /// Geocoder for placing map markers.
    pub geocoder: Box<dyn Geocoder>,
    /// Browser for showing the rendered map.
    pub browser: Box<dyn Browser>,
    recorder: Option<SharedRecorder>,
}

impl ServiceContext {
    /// Creates a context from explicit port implementations.
    #[must_use]
    pub fn new(
        fs: Box<dyn FileSystem>,
        geocoder: Box<dyn Geocoder>,
        browser: Box<dyn Browser>,
    ) -> Self {
        Self { fs, geocoder, browser, recorder: None }
    }

    /// Creates a context backed by the real disk, Nominatim, and browser.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self::new(Box::new(LiveFileSystem), Box::new(live_geocoder(config)), Box::new(LiveBrowser))
    }

    /// Creates a live context that also records every port call.
    ///
    /// The cassette is written to `path` by [`ServiceContext::finish`].
    #[must_use]
    pub fn recording(config: &Config, path: &Path) -> Self {
        let recorder: SharedRecorder =
            Arc::new(Mutex::new(CassetteRecorder::new(path, "dwellmap-merge")));

        Self {
            fs: Box::new(RecordingFileSystem::new(
                Box::new(LiveFileSystem),
                Arc::clone(&recorder),
            )),
            geocoder: Box::new(RecordingGeocoder::new(
                Box::new(live_geocoder(config)),
                Arc::clone(&recorder),
            )),
            browser: Box::new(RecordingBrowser::new(Box::new(LiveBrowser), Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a context that answers every port call from a cassette.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if the cassette cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self> {
        let cassette = Cassette::load(path)?;
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));

        Ok(Self::new(
            Box::new(ReplayingFileSystem::new(Arc::clone(&replayer))),
            Box::new(ReplayingGeocoder::new(Arc::clone(&replayer))),
            Box::new(ReplayingBrowser::new(replayer)),
        ))
    }

    /// Releases the ports and, when recording, writes the cassette.
    ///
    /// Returns the cassette path if one was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>> {
        let Self { fs, geocoder, browser, recorder } = self;
        drop((fs, geocoder, browser));

        let Some(recorder) = recorder else {
            return Ok(None);
        };
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| Error::Cassette("recording adapters still hold the recorder".into()))?
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        recorder.finish().map(Some)
    }
}

fn live_geocoder(config: &Config) -> NominatimGeocoder {
    NominatimGeocoder::new(&config.geocoder_url, &config.user_agent, config.geocode_interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_context_finishes_without_cassette() {
        let ctx = ServiceContext::live(&Config::default());
        assert_eq!(ctx.finish().unwrap(), None);
    }

    #[test]
    fn recording_context_writes_cassette_on_finish() {
        let dir = std::env::temp_dir().join("dwellmap_ctx_record_test");
        let cassette = dir.join("run.cassette.yaml");
        let data = dir.join("data.csv");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&data, "address,permit,units\n").unwrap();

        let ctx = ServiceContext::recording(&Config::default(), &cassette);
        assert_eq!(ctx.fs.read_to_string(&data).unwrap(), "address,permit,units\n");
        let written = ctx.finish().unwrap();
        assert_eq!(written.as_deref(), Some(cassette.as_path()));

        let replayed = ServiceContext::replaying(&cassette).unwrap();
        assert_eq!(replayed.fs.read_to_string(&data).unwrap(), "address,permit,units\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replaying_missing_cassette_fails() {
        assert!(ServiceContext::replaying(Path::new("/nonexistent/run.cassette.yaml")).is_err());
    }
}
