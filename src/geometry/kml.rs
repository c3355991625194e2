//! KML/KMZ polygon extraction.
//!
//! Walks the whole element tree (Document/Folder nesting of any depth) and
//! collects the `outerBoundaryIs` ring of every `Polygon`, in document order.
//! Points, lines and `innerBoundaryIs` rings are skipped. KML writes
//! `lon,lat[,alt]` tuples; each is turned into a [`LatLon`] exactly once, here.

use std::io::{Cursor, Read};

use quick_xml::{events::Event, Reader};
use zip::ZipArchive;

use crate::error::ResolutionError;

use super::boundary::{GeometryBoundary, LatLon};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Parse a KML document, or a KMZ archive holding one.
pub fn parse_polygons(bytes: &[u8]) -> Result<Vec<GeometryBoundary>, ResolutionError> {
    if bytes.starts_with(ZIP_MAGIC) {
        parse_kml(&unpack_kmz(bytes)?)
    } else {
        parse_kml(bytes)
    }
}

/// First `.kml` entry of a KMZ archive.
fn unpack_kmz(bytes: &[u8]) -> Result<Vec<u8>, ResolutionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| parse_error(format!("unreadable KMZ archive: {e}")))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)
            .map_err(|e| parse_error(format!("unreadable KMZ entry {i}: {e}")))?;
        if !entry.name().to_ascii_lowercase().ends_with(".kml") { continue }

        let mut kml = Vec::new();
        entry.read_to_end(&mut kml)
            .map_err(|e| parse_error(format!("failed to inflate {}: {e}", entry.name())))?;
        return Ok(kml);
    }
    Err(parse_error("KMZ archive contains no .kml document"))
}

/// Parse a plain KML document.
pub fn parse_kml(bytes: &[u8]) -> Result<Vec<GeometryBoundary>, ResolutionError> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut seen_root = false;

    // Exterior ring of the polygon currently open, once its coordinates close.
    let mut polygon: Option<Option<GeometryBoundary>> = None;
    let mut coords: Option<String> = None;
    let mut out = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)
            .map_err(|e| parse_error(format!("at byte {}: {e}", reader.buffer_position())))?;

        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                check_top_level(&name, &stack, &mut seen_root)?;
                if name == b"Polygon" && polygon.is_none() {
                    polygon = Some(None);
                }
                if name == b"coordinates" && polygon.is_some() && in_exterior_ring(&stack) {
                    coords = Some(String::new());
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                check_top_level(e.local_name().as_ref(), &stack, &mut seen_root)?;
            }
            Event::Text(t) => {
                if let Some(text) = coords.as_mut() {
                    let chunk = t.unescape()
                        .map_err(|e| parse_error(format!("bad text in <coordinates>: {e}")))?;
                    text.push_str(&chunk);
                    text.push(' ');
                }
            }
            Event::CData(c) => {
                if let Some(text) = coords.as_mut() {
                    let chunk = std::str::from_utf8(&c)
                        .map_err(|e| parse_error(format!("bad CDATA in <coordinates>: {e}")))?;
                    text.push_str(chunk);
                    text.push(' ');
                }
            }
            Event::End(e) => {
                let name = e.local_name().as_ref().to_vec();
                stack.pop();

                if name == b"coordinates" {
                    if let Some(text) = coords.take() {
                        let ring = parse_ring(&text)?;
                        if let Some(exterior) = polygon.as_mut() {
                            exterior.get_or_insert(ring);
                        }
                    }
                } else if name == b"Polygon" && !stack.iter().any(|n| n == b"Polygon") {
                    // Polygons without an exterior ring are skipped.
                    if let Some(Some(ring)) = polygon.take() {
                        out.push(ring);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(parse_error("document has no root element"));
    }
    if let Some(open) = stack.last() {
        return Err(parse_error(format!(
            "document ended inside <{}>", String::from_utf8_lossy(open)
        )));
    }
    Ok(out)
}

/// A single `<kml>` root, and nothing after it.
fn check_top_level(name: &[u8], stack: &[Vec<u8>], seen_root: &mut bool) -> Result<(), ResolutionError> {
    if !stack.is_empty() { return Ok(()) }
    if *seen_root {
        return Err(parse_error(format!(
            "unexpected <{}> after the root element", String::from_utf8_lossy(name)
        )));
    }
    if name != b"kml" {
        return Err(parse_error(format!(
            "root element is <{}>, expected <kml>", String::from_utf8_lossy(name)
        )));
    }
    *seen_root = true;
    Ok(())
}

/// `coordinates` directly under `outerBoundaryIs/LinearRing`.
fn in_exterior_ring(stack: &[Vec<u8>]) -> bool {
    matches!(stack, [.., outer, ring] if outer == b"outerBoundaryIs" && ring == b"LinearRing")
}

/// Whitespace-separated `lon,lat[,alt]` tuples.
fn parse_ring(text: &str) -> Result<GeometryBoundary, ResolutionError> {
    let vertices = text.split_whitespace()
        .map(parse_tuple)
        .collect::<Result<Vec<_>, _>>()?;
    let count = vertices.len();

    GeometryBoundary::new(vertices).ok_or_else(|| parse_error(format!(
        "polygon ring has {count} vertices; at least {} required", GeometryBoundary::MIN_VERTICES
    )))
}

fn parse_tuple(tuple: &str) -> Result<LatLon, ResolutionError> {
    let bad = |why: &str| parse_error(format!("bad coordinate tuple {tuple:?}: {why}"));

    let parts = tuple.split(',').collect::<Vec<_>>();
    if !(2..=3).contains(&parts.len()) {
        return Err(bad("expected lon,lat[,alt]"));
    }
    let values = parts.iter()
        .map(|p| p.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| bad(&e.to_string()))?;

    LatLon::from_lon_lat(values[0], values[1]).map_err(|why| bad(&why))
}

fn parse_error(message: impl Into<String>) -> ResolutionError {
    ResolutionError::Parse(message.into())
}
