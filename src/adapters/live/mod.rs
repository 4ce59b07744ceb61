//! Live adapters for real external interactions.

pub mod browser;
pub mod filesystem;
pub mod geocoder;

pub use browser::LiveBrowser;
pub use filesystem::LiveFileSystem;
pub use geocoder::NominatimGeocoder;
