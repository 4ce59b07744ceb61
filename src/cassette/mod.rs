//! Cassettes: recorded port interactions that can be replayed offline.
//!
//! A live run with `DWELLMAP_RECORD=<file>` captures every filesystem,
//! geocoder, and browser call. `DWELLMAP_REPLAY=<file>` serves the same
//! answers back without touching disk, network, or desktop.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Cassette, Interaction};
pub use recorder::CassetteRecorder;
pub use replayer::CassetteReplayer;
