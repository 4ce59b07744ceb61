//! Writes `dwelling_units` tags onto matched elements.

use std::collections::{HashMap, HashSet};

use quick_xml::events::{BytesDecl, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::extract::attribute;
use super::{ElementKind, ElementRef, DWELLING_UNITS_KEY};
use crate::error::{Error, Result};

/// The annotated document plus what was actually touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    /// Full XML text, starting with a UTF-8 declaration.
    pub document: String,
    /// Elements that received a `dwelling_units` tag.
    pub annotated: HashSet<ElementRef>,
}

impl Annotated {
    /// Number of annotated elements of `kind`.
    #[must_use]
    pub fn count(&self, kind: ElementKind) -> usize {
        self.annotated.iter().filter(|e| e.kind == kind).count()
    }
}

/// Copies `osm_text`, appending `<tag k="dwelling_units" v="…"/>` as the
/// last child of every element listed in `values`.
///
/// Everything else passes through byte for byte, except that the output
/// always opens with `<?xml version="1.0" encoding="UTF-8"?>` in place of
/// whatever declaration the source had. Self-closing elements are expanded
/// so they can hold the new child. Entries in `values` that do not occur in
/// the document are ignored; [`Annotated::annotated`] says which did.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the document is not well-formed XML.
pub fn annotate(
    osm_text: &str,
    source_name: &str,
    values: &HashMap<ElementRef, String>,
) -> Result<Annotated> {
    let mut reader = Reader::from_str(osm_text);
    let mut writer = Writer::new(Vec::with_capacity(osm_text.len() + values.len() * 48));
    let mut annotated = HashSet::new();
    // One entry per open element: the value to append before its end tag.
    let mut open: Vec<Option<&str>> = Vec::new();
    let mut after_source_decl = false;

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)), source_name)?;
    emit(&mut writer, Event::Text(BytesText::from_escaped("\n")), source_name)?;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::parse(source_name, format!("{e} at byte {}", reader.error_position()))
        })?;
        let skip_whitespace = std::mem::take(&mut after_source_decl);

        match event {
            Event::Decl(_) => after_source_decl = true,
            Event::Text(text) if skip_whitespace && text.iter().all(u8::is_ascii_whitespace) => {}
            Event::Start(start) => {
                let value = match lookup(&start, values, source_name)? {
                    Some((element, value)) => {
                        annotated.insert(element);
                        Some(value)
                    }
                    None => None,
                };
                open.push(value);
                emit(&mut writer, Event::Start(start), source_name)?;
            }
            Event::Empty(start) => match lookup(&start, values, source_name)? {
                Some((element, value)) => {
                    annotated.insert(element);
                    let end = start.to_end().into_owned();
                    emit(&mut writer, Event::Start(start), source_name)?;
                    emit(&mut writer, dwelling_units_tag(value), source_name)?;
                    emit(&mut writer, Event::End(end), source_name)?;
                }
                None => emit(&mut writer, Event::Empty(start), source_name)?,
            },
            Event::End(end) => {
                if let Some(Some(value)) = open.pop() {
                    emit(&mut writer, dwelling_units_tag(value), source_name)?;
                }
                emit(&mut writer, Event::End(end), source_name)?;
            }
            Event::Eof => break,
            other => emit(&mut writer, other, source_name)?,
        }
    }

    let document =
        String::from_utf8(writer.into_inner()).map_err(|e| Error::parse(source_name, e))?;
    Ok(Annotated { document, annotated })
}

/// Returns the element reference and value if `start` is a listed element.
fn lookup<'v>(
    start: &BytesStart<'_>,
    values: &'v HashMap<ElementRef, String>,
    source_name: &str,
) -> Result<Option<(ElementRef, &'v str)>> {
    let Some(kind) = ElementKind::from_tag_name(start.name().as_ref()) else {
        return Ok(None);
    };
    let Some(id) = attribute(start, "id", source_name)? else {
        return Ok(None);
    };
    let element = ElementRef { kind, id };
    Ok(values.get(&element).map(|v| (element, v.as_str())))
}

fn dwelling_units_tag(value: &str) -> Event<'_> {
    Event::Empty(BytesStart::new("tag").with_attributes([("k", DWELLING_UNITS_KEY), ("v", value)]))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>, source_name: &str) -> Result<()> {
    writer.write_event(event).map_err(|e| Error::parse(source_name, e))
}
