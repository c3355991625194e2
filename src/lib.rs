#![doc = "impactmap public API"]
mod config;
mod error;
mod fetch;
mod pipeline;
mod record;

pub mod feed;
pub mod geometry;
pub mod io;

#[doc(inline)]
pub use config::PipelineConfig;

#[doc(inline)]
pub use error::{ClientError, ExtractionError, FetchError, PipelineError, ResolutionError};

#[doc(inline)]
pub use feed::{extract, extract_fields, RowSelector, Sdg, SdgTags, SourceFeed};

#[doc(inline)]
pub use fetch::Fetch;

#[cfg(feature = "download")]
#[doc(inline)]
pub use fetch::HttpFetcher;

#[doc(inline)]
pub use geometry::{GeometryBoundary, GeometryResolver, LatLon};

#[doc(inline)]
pub use pipeline::{Pipeline, Snapshot};

#[doc(inline)]
pub use record::{assemble, Bounds, ImpactRecord, ImpactRecordFields};
