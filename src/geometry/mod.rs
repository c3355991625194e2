mod boundary;
mod kml;
mod link;
mod resolve;

pub use boundary::{GeometryBoundary, LatLon};
pub(crate) use boundary::{check_latitude, check_longitude};
pub use kml::{parse_kml, parse_polygons};
pub use link::{direct_download_url, share_link_id};
pub use resolve::GeometryResolver;
