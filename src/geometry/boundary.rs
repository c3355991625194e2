use geo::{Contains, Coord, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

/// A WGS84 position, latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Build a position, rejecting non-finite or out-of-range degrees.
    pub fn new(lat: f64, lon: f64) -> Result<Self, String> {
        check_latitude(lat)?;
        check_longitude(lon)?;
        Ok(Self { lat, lon })
    }

    /// Position for a (longitude, latitude) pair, as written by KML and GeoJSON.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Result<Self, String> { Self::new(lat, lon) }

    /// geo coordinate with x = longitude, y = latitude.
    pub fn to_coord(self) -> Coord<f64> { Coord { x: self.lon, y: self.lat } }
}

pub(crate) fn check_latitude(lat: f64) -> Result<f64, String> {
    if !lat.is_finite() { return Err("latitude is not a finite number".into()) }
    if !(-90.0..=90.0).contains(&lat) { return Err(format!("latitude {lat} outside [-90, 90]")) }
    Ok(lat)
}

pub(crate) fn check_longitude(lon: f64) -> Result<f64, String> {
    if !lon.is_finite() { return Err("longitude is not a finite number".into()) }
    if !(-180.0..=180.0).contains(&lon) { return Err(format!("longitude {lon} outside [-180, 180]")) }
    Ok(lon)
}

/// Exterior ring of one polygon, stored as (latitude, longitude) vertices in
/// source order. Closure is kept exactly as the source wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryBoundary {
    vertices: Vec<LatLon>,
}

impl GeometryBoundary {
    pub const MIN_VERTICES: usize = 3;

    /// `None` if fewer than [`Self::MIN_VERTICES`] vertices are given.
    pub fn new(vertices: Vec<LatLon>) -> Option<Self> {
        (vertices.len() >= Self::MIN_VERTICES).then_some(Self { vertices })
    }

    pub fn vertices(&self) -> &[LatLon] { &self.vertices }

    pub fn len(&self) -> usize { self.vertices.len() }

    pub fn is_empty(&self) -> bool { self.vertices.is_empty() }

    /// First vertex repeated at the end.
    pub fn is_closed(&self) -> bool { self.vertices.first() == self.vertices.last() }

    /// Planar polygon in geo's (x = longitude, y = latitude) convention.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let ring: LineString<f64> = self.vertices.iter().map(|v| v.to_coord()).collect();
        Polygon::new(ring, vec![])
    }

    /// Whether `point` lies strictly inside the ring.
    pub fn contains(&self, point: LatLon) -> bool {
        self.to_polygon().contains(&Point::from(point.to_coord()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ll(lat: f64, lon: f64) -> LatLon { LatLon::new(lat, lon).unwrap() }

    #[test]
    fn latlon_bounds() {
        assert!(LatLon::new(90.0, 180.0).is_ok());
        assert!(LatLon::new(-90.0, -180.0).is_ok());
        assert!(LatLon::new(90.5, 0.0).is_err());
        assert!(LatLon::new(0.0, -180.1).is_err());
        assert!(LatLon::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn from_lon_lat_swaps_once() {
        let p = LatLon::from_lon_lat(10.0, 1.0).unwrap();
        assert_eq!((p.lat, p.lon), (1.0, 10.0));
        assert_eq!(p.to_coord(), Coord { x: 10.0, y: 1.0 });
    }

    #[test]
    fn needs_three_vertices() {
        assert!(GeometryBoundary::new(vec![ll(0.0, 0.0), ll(1.0, 1.0)]).is_none());
        assert!(GeometryBoundary::new(vec![ll(0.0, 0.0), ll(1.0, 1.0), ll(0.0, 1.0)]).is_some());
    }

    #[test]
    fn closure_is_preserved() {
        let open = GeometryBoundary::new(vec![ll(0.0, 0.0), ll(0.0, 1.0), ll(1.0, 1.0)]).unwrap();
        let closed = GeometryBoundary::new(vec![ll(0.0, 0.0), ll(0.0, 1.0), ll(1.0, 1.0), ll(0.0, 0.0)]).unwrap();
        assert!(!open.is_closed());
        assert_eq!(open.len(), 3);
        assert!(closed.is_closed());
        assert_eq!(closed.len(), 4);
    }

    #[test]
    fn contains_uses_lat_lon_axes() {
        // 1° tall, 10° wide box: (lat 0..1, lon 0..10)
        let boundary = GeometryBoundary::new(vec![
            ll(0.0, 0.0), ll(0.0, 10.0), ll(1.0, 10.0), ll(1.0, 0.0), ll(0.0, 0.0),
        ]).unwrap();
        assert!(boundary.contains(ll(0.5, 5.0)));
        assert!(!boundary.contains(ll(5.0, 0.5)));
    }
}
