//! GeoJSON export of records and boundaries.
//!
//! GeoJSON positions are `[lon, lat]`, so this is the one place outside the
//! KML reader where axis order changes.

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::geometry::{GeometryBoundary, LatLon};
use crate::record::ImpactRecord;

fn position(v: LatLon) -> Value { json!([v.lon, v.lat]) }

fn polygon_feature(idx: usize, boundary: &GeometryBoundary) -> Value {
    let ring: Vec<Value> = boundary.vertices().iter().copied().map(position).collect();
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        },
        "properties": {
            "index": idx,
        }
    })
}

/// FeatureCollection with one Polygon per boundary.
pub fn boundaries_to_geojson(boundaries: &[GeometryBoundary]) -> Value {
    let features: Vec<Value> = boundaries.iter().enumerate()
        .map(|(idx, b)| polygon_feature(idx, b))
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// FeatureCollection with the record's centroid (carrying the record's
/// table fields as properties) followed by its boundaries.
pub fn record_to_geojson(record: &ImpactRecord) -> Value {
    let properties: serde_json::Map<String, Value> = record.parameters().into_iter()
        .map(|(label, value)| (label.to_string(), Value::String(value)))
        .collect();

    let centroid = json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": position(record.location()),
        },
        "properties": properties,
    });

    let features: Vec<Value> = std::iter::once(centroid)
        .chain(record.boundaries().iter().enumerate().map(|(idx, b)| polygon_feature(idx, b)))
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write a record to GeoJSON bytes.
pub fn write_record_geojson_bytes(record: &ImpactRecord) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(&record_to_geojson(record)).context("Failed to serialize GeoJSON to bytes")
}
