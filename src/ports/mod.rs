//! Port traits for everything the pipeline does not compute itself.
//!
//! Each trait is one external boundary: files on disk, the geocoding
//! service, and the desktop browser. Implementations live in
//! `src/adapters/` (live, recording, replaying).

pub mod browser;
pub mod filesystem;
pub mod geocoder;

pub use browser::Browser;
pub use filesystem::FileSystem;
pub use geocoder::{Coordinates, GeocodeFuture, Geocoder};

/// Error type returned across port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
