//! Format-specific reading and writing.
//!
//! - `csv` - feed tables, read as all-text polars frames
//! - `geojson` - record and boundary export for map layers

pub(crate) mod csv;
pub mod geojson;
