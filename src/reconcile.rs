//! Joins OSM addresses against permit records and annotates the matches.
//!
//! Matching and annotation are pure; [`reconcile`] adds the single write of
//! the annotated document.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::address::CanonicalAddress;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::osm::annotate::{annotate, Annotated};
use crate::osm::{ElementKind, ElementRef, GeoAddresses};
use crate::records::DwellingRecords;

/// An OSM element whose address has a permit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The matched element.
    pub element: ElementRef,
    /// The shared address key.
    pub address: CanonicalAddress,
    /// Dwelling-unit count from the record.
    pub dwelling_units: String,
}

/// Matched element → address, in OSM document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedElements {
    entries: Vec<(ElementRef, CanonicalAddress)>,
}

impl MatchedElements {
    /// Number of matched elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates matches in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&ElementRef, &CanonicalAddress)> {
        self.entries.iter().map(|(e, a)| (e, a))
    }

    /// Address matched for `element`, if any.
    #[must_use]
    pub fn get(&self, element: &ElementRef) -> Option<&CanonicalAddress> {
        self.entries.iter().find(|(e, _)| e == element).map(|(_, a)| a)
    }
}

impl FromIterator<(ElementRef, CanonicalAddress)> for MatchedElements {
    fn from_iter<T: IntoIterator<Item = (ElementRef, CanonicalAddress)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Outcome of a reconcile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Elements that matched and were annotated.
    pub matched: MatchedElements,
    /// How many of them are nodes.
    pub nodes: usize,
    /// How many of them are ways.
    pub ways: usize,
}

/// Pairs every OSM address with its permit record, if one exists.
#[must_use]
pub fn find_matches(geo: &GeoAddresses, records: &DwellingRecords) -> Vec<Match> {
    geo.iter()
        .filter_map(|entry| {
            let units = records.get(&entry.address)?;
            debug!(element = %entry.element, address = %entry.address, units, "matched");
            Some(Match {
                element: entry.element.clone(),
                address: entry.address.clone(),
                dwelling_units: units.to_string(),
            })
        })
        .collect()
}

/// Annotates `osm_text` with the dwelling units of each match.
///
/// Returns the annotated document and the subset of `matches` whose element
/// was actually present.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the document is not well-formed XML.
pub fn apply_matches(
    osm_text: &str,
    source_name: &str,
    matches: &[Match],
) -> Result<(Annotated, MatchedElements)> {
    let values: HashMap<ElementRef, String> =
        matches.iter().map(|m| (m.element.clone(), m.dwelling_units.clone())).collect();
    let annotated = annotate(osm_text, source_name, &values)?;

    let matched = matches
        .iter()
        .filter(|m| {
            let found = annotated.annotated.contains(&m.element);
            if !found {
                debug!(element = %m.element, "matched element not found in document; skipping");
            }
            found
        })
        .map(|m| (m.element.clone(), m.address.clone()))
        .collect();
    Ok((annotated, matched))
}

/// Matches, annotates, and writes the annotated OSM document to
/// `output_path`.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed XML and [`Error::Io`] if the
/// output cannot be written. Nothing is returned unless the write succeeded.
pub fn reconcile(
    ctx: &ServiceContext,
    geo: &GeoAddresses,
    records: &DwellingRecords,
    osm_text: &str,
    source_name: &str,
    output_path: &Path,
) -> Result<Reconciliation> {
    let matches = find_matches(geo, records);
    let (annotated, matched) = apply_matches(osm_text, source_name, &matches)?;

    ctx.fs.write(output_path, &annotated.document).map_err(|e| Error::io(output_path, e))?;

    let nodes = annotated.count(ElementKind::Node);
    let ways = annotated.count(ElementKind::Way);
    info!(
        matched = matched.len(),
        nodes,
        ways,
        output = %output_path.display(),
        "wrote annotated OSM document"
    );
    Ok(Reconciliation { matched, nodes, ways })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ports::{Browser, FileSystem, GeocodeFuture, Geocoder, PortError};

    fn addr(s: &str) -> CanonicalAddress {
        CanonicalAddress::from_canonical(s)
    }

    fn records(pairs: &[(&str, &str)]) -> DwellingRecords {
        pairs.iter().map(|(a, u)| (addr(a), (*u).to_string())).collect()
    }

    fn geo(pairs: &[(ElementRef, &str)]) -> GeoAddresses {
        let mut geo = GeoAddresses::default();
        for (element, address) in pairs {
            geo.insert(element.clone(), addr(address));
        }
        geo
    }

    const OSM: &str = r#"<osm>
  <node id="7" lat="45.5" lon="-122.6">
    <tag k="addr:housenumber" v="100"/>
    <tag k="addr:street" v="Main Street"/>
  </node>
  <node id="8" lat="45.5" lon="-122.6">
    <tag k="addr:housenumber" v="200"/>
    <tag k="addr:street" v="Oak St"/>
  </node>
</osm>"#;

    /// Filesystem that keeps writes in memory; optionally refuses them.
    #[derive(Default)]
    struct MemFs {
        written: Mutex<HashMap<std::path::PathBuf, String>>,
        fail_writes: bool,
    }

    impl FileSystem for MemFs {
        fn read_to_string(&self, path: &Path) -> std::result::Result<String, PortError> {
            Err(format!("unexpected read of {}", path.display()).into())
        }

        fn write(&self, path: &Path, contents: &str) -> std::result::Result<(), PortError> {
            if self.fail_writes {
                return Err("disk full".into());
            }
            self.written.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    struct NoGeocoder;
    impl Geocoder for NoGeocoder {
        fn geocode(&self, _query: &str) -> GeocodeFuture<'_> {
            Box::pin(async { Err("not used".into()) })
        }
    }

    struct NoBrowser;
    impl Browser for NoBrowser {
        fn open(&self, _path: &Path) -> std::result::Result<(), PortError> {
            Err("not used".into())
        }
    }

    fn context(fs: MemFs) -> (ServiceContext, std::sync::Arc<MemFs>) {
        let fs = std::sync::Arc::new(fs);
        let ctx = ServiceContext::new(
            Box::new(SharedFs(std::sync::Arc::clone(&fs))),
            Box::new(NoGeocoder),
            Box::new(NoBrowser),
        );
        (ctx, fs)
    }

    struct SharedFs(std::sync::Arc<MemFs>);
    impl FileSystem for SharedFs {
        fn read_to_string(&self, path: &Path) -> std::result::Result<String, PortError> {
            self.0.read_to_string(path)
        }
        fn write(&self, path: &Path, contents: &str) -> std::result::Result<(), PortError> {
            self.0.write(path, contents)
        }
    }

    #[test]
    fn join_matches_on_shared_address() {
        let matches = find_matches(
            &geo(&[(ElementRef::node("7"), "100 main street")]),
            &records(&[("100 main street", "4")]),
        );
        assert_eq!(
            matches,
            vec![Match {
                element: ElementRef::node("7"),
                address: addr("100 main street"),
                dwelling_units: "4".into(),
            }]
        );
    }

    #[test]
    fn unmatched_address_produces_nothing() {
        let matches = find_matches(
            &geo(&[(ElementRef::node("8"), "200 oak st")]),
            &records(&[("200 oak street", "2")]),
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn reconcile_annotates_and_writes() {
        let (ctx, fs) = context(MemFs::default());
        let out = Path::new("out.osm");

        let result = reconcile(
            &ctx,
            &geo(&[
                (ElementRef::node("7"), "100 main street"),
                (ElementRef::node("8"), "200 oak st"),
            ]),
            &records(&[("100 main street", "4")]),
            OSM,
            "test.osm",
            out,
        )
        .unwrap();

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched.get(&ElementRef::node("7")), Some(&addr("100 main street")));
        assert_eq!((result.nodes, result.ways), (1, 0));

        let written = fs.written.lock().unwrap();
        let doc = written.get(out).unwrap();
        assert!(doc.starts_with("<?xml"));
        assert!(doc.contains(r#"<tag k="dwelling_units" v="4"/></node>"#));
        assert_eq!(doc.matches("dwelling_units").count(), 1);
    }

    #[test]
    fn match_missing_from_document_is_skipped() {
        let (ctx, _fs) = context(MemFs::default());
        let result = reconcile(
            &ctx,
            &geo(&[(ElementRef::way("7"), "100 main street")]),
            &records(&[("100 main street", "4")]),
            OSM,
            "test.osm",
            Path::new("out.osm"),
        )
        .unwrap();
        assert!(result.matched.is_empty());
    }

    #[test]
    fn failed_write_fails_the_run() {
        let (ctx, _fs) = context(MemFs { fail_writes: true, ..MemFs::default() });
        let err = reconcile(
            &ctx,
            &geo(&[(ElementRef::node("7"), "100 main street")]),
            &records(&[("100 main street", "4")]),
            OSM,
            "test.osm",
            Path::new("out.osm"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("disk full"));
    }
}
