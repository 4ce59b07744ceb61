//! Address canonicalization: the join key shared by both datasets.

pub mod abbreviations;
pub mod normalizer;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use normalizer::normalize;

/// Shortest canonical address considered usable as a join key.
pub const MIN_ADDRESS_LEN: usize = 5;

/// A normalized address string.
///
/// Values built with [`CanonicalAddress::from_raw`] satisfy the normalizer's
/// invariants. [`CanonicalAddress::from_canonical`] wraps a string that is
/// already in comparable form (the OSM side) without touching it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalAddress(String);

impl CanonicalAddress {
    /// Normalizes `raw` and wraps the result.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// Wraps a string that is already comparable as-is.
    #[must_use]
    pub fn from_canonical(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the address text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the address is long enough to be a real key.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.0.chars().count() >= MIN_ADDRESS_LEN
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
