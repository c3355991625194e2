use crate::config::PipelineConfig;
use crate::error::{ExtractionError, PipelineError, ResolutionError};
use crate::feed::{extract_fields, SourceFeed};
use crate::fetch::Fetch;
use crate::geometry::GeometryResolver;
use crate::record::{assemble, ImpactRecord};

/// Result of one refresh: the record, plus the geometry failure if there was
/// one. A failed geometry fetch leaves the record with zero boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub record: ImpactRecord,
    pub geometry_error: Option<ResolutionError>,
}

/// Feed fetch → row extraction → geometry resolution → assembly.
///
/// Each refresh makes at most one feed request and at most one geometry
/// request, in that order. Nothing is cached between refreshes.
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Box<dyn Fetch>,
}

impl Pipeline {
    /// Pipeline over HTTP.
    #[cfg(feature = "download")]
    pub fn new(config: PipelineConfig) -> Result<Self, crate::error::ClientError> {
        let fetcher = crate::fetch::HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: PipelineConfig, fetcher: impl Fetch + 'static) -> Self {
        Self { config, fetcher: Box::new(fetcher) }
    }

    pub fn config(&self) -> &PipelineConfig { &self.config }

    pub fn resolver(&self) -> GeometryResolver<'_> { GeometryResolver::new(self.fetcher.as_ref()) }

    /// Fetch and parse the configured feed.
    pub fn load_feed(&self) -> Result<SourceFeed, PipelineError> {
        let bytes = self.fetcher.fetch(&self.config.feed_url)?;
        Ok(SourceFeed::from_csv_bytes(&bytes)?)
    }

    /// Fetch the feed and build a fresh snapshot.
    pub fn refresh(&self) -> Result<Snapshot, PipelineError> {
        let feed = self.load_feed()?;
        Ok(self.refresh_from(&feed)?)
    }

    /// Build a snapshot from an already-loaded feed.
    pub fn refresh_from(&self, feed: &SourceFeed) -> Result<Snapshot, ExtractionError> {
        let fields = extract_fields(feed, self.config.selector)?;

        let (boundaries, geometry_error) = match self.resolver().resolve(fields.geometry_ref.as_deref()) {
            Ok(boundaries) => (boundaries, None),
            Err(err) => (Vec::new(), Some(err)),
        };

        Ok(Snapshot { record: assemble(fields, boundaries), geometry_error })
    }
}
