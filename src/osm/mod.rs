//! OpenStreetMap XML: address extraction and dwelling-unit annotation.
//!
//! Only `node` and `way` elements take part. Both modules stream the
//! document with `quick-xml`; the input text is never modified in place.

pub mod annotate;
pub mod extract;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::CanonicalAddress;

/// Tag key holding the street name.
pub const STREET_KEY: &str = "addr:street";
/// Tag key holding the house number.
pub const HOUSE_NUMBER_KEY: &str = "addr:housenumber";
/// Tag key written onto matched elements.
pub const DWELLING_UNITS_KEY: &str = "dwelling_units";

/// The kinds of OSM element that can carry an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A single point.
    Node,
    /// A polyline or building outline.
    Way,
}

impl ElementKind {
    /// Maps an XML element name to a kind.
    #[must_use]
    pub fn from_tag_name(name: &[u8]) -> Option<Self> {
        match name {
            b"node" => Some(Self::Node),
            b"way" => Some(Self::Way),
            _ => None,
        }
    }

    /// The XML element name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
        }
    }
}

/// Identifies one element in an OSM document.
///
/// OSM ids are unique per kind, not across kinds, so the kind is part of
/// the identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    /// Node or way.
    pub kind: ElementKind,
    /// The `id` attribute, verbatim.
    pub id: String,
}

impl ElementRef {
    /// Reference to a node.
    pub fn node(id: impl Into<String>) -> Self {
        Self { kind: ElementKind::Node, id: id.into() }
    }

    /// Reference to a way.
    pub fn way(id: impl Into<String>) -> Self {
        Self { kind: ElementKind::Way, id: id.into() }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.as_str(), self.id)
    }
}

/// One addressed element found in the OSM document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoAddress {
    /// Where the element lives in the document.
    pub element: ElementRef,
    /// `housenumber street`, lowercased.
    pub address: CanonicalAddress,
}

/// Addressed elements in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoAddresses {
    entries: Vec<GeoAddress>,
    positions: HashMap<ElementRef, usize>,
}

impl GeoAddresses {
    /// Appends an element, replacing the address of an earlier entry with
    /// the same reference.
    pub fn insert(&mut self, element: ElementRef, address: CanonicalAddress) {
        if let Some(&pos) = self.positions.get(&element) {
            self.entries[pos].address = address;
        } else {
            self.positions.insert(element.clone(), self.entries.len());
            self.entries.push(GeoAddress { element, address });
        }
    }

    /// Number of addressed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no element carried a full address.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, GeoAddress> {
        self.entries.iter()
    }

    /// Looks up the address recorded for `element`.
    #[must_use]
    pub fn get(&self, element: &ElementRef) -> Option<&CanonicalAddress> {
        self.positions.get(element).map(|&pos| &self.entries[pos].address)
    }
}

impl<'a> IntoIterator for &'a GeoAddresses {
    type Item = &'a GeoAddress;
    type IntoIter = std::slice::Iter<'a, GeoAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ref_displays_kind_and_id() {
        assert_eq!(ElementRef::node("7").to_string(), "node/7");
        assert_eq!(ElementRef::way("-12").to_string(), "way/-12");
    }

    #[test]
    fn same_id_different_kind_are_distinct() {
        let mut geo = GeoAddresses::default();
        geo.insert(ElementRef::node("7"), CanonicalAddress::from_canonical("1 a street"));
        geo.insert(ElementRef::way("7"), CanonicalAddress::from_canonical("2 b street"));
        assert_eq!(geo.len(), 2);
    }

    #[test]
    fn reinsert_keeps_position_and_replaces_address() {
        let mut geo = GeoAddresses::default();
        geo.insert(ElementRef::node("1"), CanonicalAddress::from_canonical("1 a street"));
        geo.insert(ElementRef::node("2"), CanonicalAddress::from_canonical("2 b street"));
        geo.insert(ElementRef::node("1"), CanonicalAddress::from_canonical("9 z street"));

        let order: Vec<String> = geo.iter().map(|e| e.element.to_string()).collect();
        assert_eq!(order, ["node/1", "node/2"]);
        assert_eq!(geo.get(&ElementRef::node("1")).unwrap().as_str(), "9 z street");
    }
}
