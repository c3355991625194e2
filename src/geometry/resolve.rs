use crate::{error::ResolutionError, fetch::Fetch};

use super::{boundary::GeometryBoundary, kml::parse_polygons, link::direct_download_url};

/// Turns an optional geometry reference into polygon boundaries.
///
/// Holds no state between calls; one resolver can serve any number of
/// references, from any number of threads.
#[derive(Clone, Copy)]
pub struct GeometryResolver<'a> {
    fetcher: &'a dyn Fetch,
}

impl<'a> GeometryResolver<'a> {
    pub fn new(fetcher: &'a dyn Fetch) -> Self { Self { fetcher } }

    /// Resolve `geometry_ref` (a KML/KMZ URL or a cloud-drive share link).
    ///
    /// An absent or blank reference yields no boundaries and no fetch.
    /// Otherwise the (rewritten) URL is fetched exactly once.
    pub fn resolve(&self, geometry_ref: Option<&str>) -> Result<Vec<GeometryBoundary>, ResolutionError> {
        let Some(reference) = geometry_ref.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(Vec::new());
        };
        let url = direct_download_url(reference);
        let bytes = self.fetcher.fetch(&url)?;
        parse_polygons(&bytes)
    }
}
