//! Street-type and directional abbreviations.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Abbreviation → expansion pairs, both lowercase.
const STREET_TYPES: &[(&str, &str)] = &[
    ("ave", "avenue"),
    ("blvd", "boulevard"),
    ("cir", "circle"),
    ("ct", "court"),
    ("dr", "drive"),
    ("ln", "lane"),
    ("n", "north"),
    ("ne", "northeast"),
    ("nw", "northwest"),
    ("pky", "parkway"),
    ("pl", "place"),
    ("rd", "road"),
    ("s", "south"),
    ("se", "southeast"),
    ("sw", "southwest"),
    ("st", "street"),
    ("w", "west"),
];

static TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STREET_TYPES.iter().copied().collect());

/// Returns the expanded form of `token`, if it is a known abbreviation.
///
/// Matching is case-insensitive; the expansion is always lowercase.
#[must_use]
pub fn expand(token: &str) -> Option<&'static str> {
    TABLE.get(token).or_else(|| TABLE.get(token.to_lowercase().as_str())).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_street_types_and_directionals() {
        assert_eq!(expand("st"), Some("street"));
        assert_eq!(expand("pky"), Some("parkway"));
        assert_eq!(expand("nw"), Some("northwest"));
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(expand("Ave"), Some("avenue"));
        assert_eq!(expand("BLVD"), Some("boulevard"));
    }

    #[test]
    fn unknown_and_expanded_tokens_miss() {
        assert_eq!(expand("main"), None);
        assert_eq!(expand("street"), None);
        assert_eq!(expand(""), None);
    }
}
