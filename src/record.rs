use geo::{BoundingRect, MultiPoint, Point};
use serde::Serialize;

use crate::feed::SdgTags;
use crate::geometry::{GeometryBoundary, LatLon};

/// Validated tabular fields of one project row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactRecordFields {
    pub location: LatLon,
    pub token_type: String,
    pub description: String,
    pub external_url: String,
    pub project_name: String,
    pub unit: String,
    pub deliverable: String,
    pub duration_years: Option<u32>,
    pub impact_type: String,
    pub sdgs: SdgTags,
    pub implementer_partner: String,
    pub internal_verification: String,
    pub local_verification: String,
    pub imv_document: String,
    /// Geometry reference from the optional `KML` column.
    pub geometry_ref: Option<String>,
}

/// One project/token, ready for rendering. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactRecord {
    #[serde(flatten)]
    fields: ImpactRecordFields,
    boundaries: Vec<GeometryBoundary>,
}

/// Lat/lon box, for framing a map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Combine validated fields with resolved boundaries. No I/O.
pub fn assemble(fields: ImpactRecordFields, boundaries: Vec<GeometryBoundary>) -> ImpactRecord {
    ImpactRecord { fields, boundaries }
}

impl ImpactRecord {
    pub fn fields(&self) -> &ImpactRecordFields { &self.fields }

    pub fn location(&self) -> LatLon { self.fields.location }

    pub fn boundaries(&self) -> &[GeometryBoundary] { &self.boundaries }

    pub fn sdgs(&self) -> &SdgTags { &self.fields.sdgs }

    pub fn project_name(&self) -> &str { &self.fields.project_name }

    /// Ordered (label, value) rows for the token details table.
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        let f = &self.fields;
        vec![
            ("Latitude", f.location.lat.to_string()),
            ("Longitude", f.location.lon.to_string()),
            ("Type of Token", f.token_type.clone()),
            ("Description", f.description.clone()),
            ("External URL", f.external_url.clone()),
            ("Starting Project", f.project_name.clone()),
            ("Unit", f.unit.clone()),
            ("Deleverable", f.deliverable.clone()),
            ("Years Duration", f.duration_years.map(|y| y.to_string()).unwrap_or_default()),
            ("Impact Type", f.impact_type.clone()),
            ("SDGs", f.sdgs.raw().to_string()),
            ("Implementer Partner", f.implementer_partner.clone()),
            ("Internal Verification", f.internal_verification.clone()),
            ("Local Verification", f.local_verification.clone()),
            ("Imv Document", f.imv_document.clone()),
        ]
    }

    /// Smallest box holding the centroid and every boundary vertex.
    pub fn bounds(&self) -> Bounds {
        let points: MultiPoint<f64> = std::iter::once(self.location())
            .chain(self.boundaries.iter().flat_map(|b| b.vertices().iter().copied()))
            .map(|v| Point::from(v.to_coord()))
            .collect();

        match points.bounding_rect() {
            Some(rect) => Bounds { south: rect.min().y, west: rect.min().x, north: rect.max().y, east: rect.max().x },
            None => {
                let LatLon { lat, lon } = self.location();
                Bounds { south: lat, west: lon, north: lat, east: lon }
            }
        }
    }

    /// Whether the record's centroid lies inside any of its boundaries.
    pub fn centroid_within_boundaries(&self) -> bool {
        self.boundaries.iter().any(|b| b.contains(self.location()))
    }
}
