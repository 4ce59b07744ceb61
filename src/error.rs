//! Error taxonomy shared by the pipeline stages.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a run.
///
/// [`Error::NotFound`] is the only variant callers routinely recover from;
/// it marks a lookup miss that the pipeline treats as a skip.
#[derive(Debug, Error)]
pub enum Error {
    /// A source document could not be parsed.
    #[error("failed to parse {source_name}: {message}")]
    Parse {
        /// Which source was being read (file path or a label).
        source_name: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A lookup found nothing.
    #[error("{0} not found")]
    NotFound(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {message}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// The geocoding service could not be reached or answered garbage.
    #[error("geocoding {query:?} failed: {message}")]
    Geocode {
        /// The free-text query that was sent.
        query: String,
        /// Underlying error message.
        message: String,
    },

    /// A record/replay cassette was unusable.
    #[error("cassette error: {0}")]
    Cassette(String),

    /// The async runtime for geocoding could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(String),
}

impl Error {
    /// Builds a [`Error::Parse`] from any displayable parser error.
    pub fn parse(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Parse { source_name: source_name.into(), message: err.to_string() }
    }

    /// Builds an [`Error::Io`] from any displayable error.
    pub fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Io { path: path.into(), message: err.to_string() }
    }
}
