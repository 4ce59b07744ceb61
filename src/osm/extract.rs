//! Finds `node`/`way` elements that carry a full street address.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::{ElementKind, ElementRef, GeoAddresses, HOUSE_NUMBER_KEY, STREET_KEY};
use crate::address::CanonicalAddress;
use crate::error::{Error, Result};

/// How OSM address strings are turned into join keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeoKeyMode {
    /// `housenumber street`, lowercased and otherwise untouched.
    #[default]
    Lowercase,
    /// Run `housenumber street` through the full address normalizer.
    Normalized,
}

/// An element whose `tag` children are still being read.
struct Pending {
    element: ElementRef,
    child_depth: usize,
    street: Option<String>,
    house_number: Option<String>,
}

impl Pending {
    fn address(self, mode: GeoKeyMode) -> Option<(ElementRef, CanonicalAddress)> {
        let (Some(house_number), Some(street)) = (self.house_number, self.street) else {
            return None;
        };
        let joined = format!("{house_number} {street}");
        let address = match mode {
            GeoKeyMode::Lowercase => CanonicalAddress::from_canonical(joined.to_lowercase()),
            GeoKeyMode::Normalized => CanonicalAddress::from_raw(&joined),
        };
        Some((self.element, address))
    }
}

/// Collects every `node` and `way` that has both an `addr:housenumber` and
/// an `addr:street` tag as direct children.
///
/// Elements missing either tag, or missing an `id`, are left out. When a
/// key repeats on one element the last value wins.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the document is not well-formed XML.
pub fn extract(osm_text: &str, source_name: &str, mode: GeoKeyMode) -> Result<GeoAddresses> {
    let mut reader = Reader::from_str(osm_text);
    let mut geo = GeoAddresses::default();
    let mut current: Option<Pending> = None;
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::parse(source_name, format!("{e} at byte {}", reader.error_position()))
        })?;
        match event {
            Event::Start(e) => {
                if let Some(kind) = ElementKind::from_tag_name(e.name().as_ref()) {
                    current = open(kind, &e, depth + 1, source_name)?;
                } else if e.name().as_ref() == b"tag" {
                    collect_tag(current.as_mut(), &e, depth, source_name)?;
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"tag" {
                    collect_tag(current.as_mut(), &e, depth, source_name)?;
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if ElementKind::from_tag_name(e.name().as_ref()).is_some()
                    && current.as_ref().is_some_and(|p| p.child_depth == depth + 1)
                {
                    if let Some((element, address)) = current.take().and_then(|p| p.address(mode))
                    {
                        debug!(%element, %address, "found addressed element");
                        geo.insert(element, address);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(geo)
}

fn open(
    kind: ElementKind,
    start: &BytesStart<'_>,
    child_depth: usize,
    source_name: &str,
) -> Result<Option<Pending>> {
    let Some(id) = attribute(start, "id", source_name)? else {
        debug!(kind = kind.as_str(), "skipping element without id");
        return Ok(None);
    };
    Ok(Some(Pending {
        element: ElementRef { kind, id },
        child_depth,
        street: None,
        house_number: None,
    }))
}

fn collect_tag(
    pending: Option<&mut Pending>,
    tag: &BytesStart<'_>,
    depth: usize,
    source_name: &str,
) -> Result<()> {
    let Some(pending) = pending else {
        return Ok(());
    };
    if depth != pending.child_depth {
        return Ok(());
    }
    let Some(key) = attribute(tag, "k", source_name)? else {
        return Ok(());
    };
    let slot = match key.as_str() {
        STREET_KEY => &mut pending.street,
        HOUSE_NUMBER_KEY => &mut pending.house_number,
        _ => return Ok(()),
    };
    *slot = Some(attribute(tag, "v", source_name)?.unwrap_or_default());
    Ok(())
}

/// Reads and unescapes one attribute value.
pub(crate) fn attribute(
    start: &BytesStart<'_>,
    name: &str,
    source_name: &str,
) -> Result<Option<String>> {
    let attr = start.try_get_attribute(name).map_err(|e| Error::parse(source_name, e))?;
    attr.map(|a| a.unescape_value().map(|v| v.into_owned()))
        .transpose()
        .map_err(|e| Error::parse(source_name, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="test">
  <node id="1" lat="45.5" lon="-122.6">
    <tag k="addr:housenumber" v="100"/>
    <tag k="addr:street" v="Main Street"/>
  </node>
  <node id="2" lat="45.5" lon="-122.6">
    <tag k="addr:street" v="Oak Avenue"/>
  </node>
  <node id="3" lat="45.5" lon="-122.6"/>
  <way id="10">
    <nd ref="1"/>
    <tag k="building" v="yes"/>
    <tag k="addr:street" v="NE Alberta St"/>
    <tag k="addr:housenumber" v="2500"/>
  </way>
  <relation id="20">
    <tag k="addr:housenumber" v="1"/>
    <tag k="addr:street" v="Nowhere Street"/>
  </relation>
</osm>
"#;

    #[test]
    fn keeps_only_fully_addressed_nodes_and_ways() {
        let geo = extract(SAMPLE, "sample.osm", GeoKeyMode::Lowercase).unwrap();

        assert_eq!(geo.len(), 2);
        assert_eq!(geo.get(&ElementRef::node("1")).unwrap().as_str(), "100 main street");
        assert_eq!(geo.get(&ElementRef::way("10")).unwrap().as_str(), "2500 ne alberta st");
        assert!(geo.get(&ElementRef::node("2")).is_none());
    }

    #[test]
    fn preserves_document_order() {
        let geo = extract(SAMPLE, "sample.osm", GeoKeyMode::Lowercase).unwrap();
        let order: Vec<String> = geo.iter().map(|g| g.element.to_string()).collect();
        assert_eq!(order, ["node/1", "way/10"]);
    }

    #[test]
    fn normalized_mode_expands_abbreviations() {
        let geo = extract(SAMPLE, "sample.osm", GeoKeyMode::Normalized).unwrap();
        assert_eq!(
            geo.get(&ElementRef::way("10")).unwrap().as_str(),
            "2500 northeast alberta street"
        );
    }

    #[test]
    fn last_duplicate_key_wins() {
        let xml = r#"<osm><node id="5">
            <tag k="addr:housenumber" v="1"/>
            <tag k="addr:housenumber" v="2"/>
            <tag k="addr:street" v="Elm Street"/>
        </node></osm>"#;
        let geo = extract(xml, "dup.osm", GeoKeyMode::Lowercase).unwrap();
        assert_eq!(geo.get(&ElementRef::node("5")).unwrap().as_str(), "2 elm street");
    }

    #[test]
    fn unescapes_attribute_values() {
        let xml = r#"<osm><node id="6">
            <tag k="addr:housenumber" v="7"/>
            <tag k="addr:street" v="Lewis &amp; Clark Way"/>
        </node></osm>"#;
        let geo = extract(xml, "esc.osm", GeoKeyMode::Lowercase).unwrap();
        assert_eq!(geo.get(&ElementRef::node("6")).unwrap().as_str(), "7 lewis & clark way");
    }

    #[test]
    fn element_without_id_is_skipped() {
        let xml = r#"<osm><node>
            <tag k="addr:housenumber" v="1"/>
            <tag k="addr:street" v="Elm Street"/>
        </node></osm>"#;
        let geo = extract(xml, "noid.osm", GeoKeyMode::Lowercase).unwrap();
        assert!(geo.is_empty());
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let xml = r#"<osm><node id="1"><tag k="addr:street" v="x"/></way></osm>"#;
        let err = extract(xml, "bad.osm", GeoKeyMode::Lowercase).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("bad.osm"));
    }
}
