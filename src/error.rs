use thiserror::Error;

/// Failure to turn a feed row into a validated record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    #[error("feed contains no rows")]
    EmptyFeed,

    #[error("feed is missing required column '{column}'")]
    Schema { column: String },

    #[error("invalid value for '{field}': {value:?} ({reason})")]
    FieldValidation { field: String, value: String, reason: String },

    #[error("row {index} requested but feed has {rows} rows")]
    RowOutOfRange { index: usize, rows: usize },

    #[error("feed could not be read as CSV: {0}")]
    Malformed(String),
}

/// Failure of a single network fetch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// The HTTP client could not be built (e.g. an invalid user agent).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct ClientError(pub String);

/// Failure to turn a geometry reference into boundaries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    #[error("geometry fetch from {url} returned status {status}")]
    Retrieval { url: String, status: u16 },

    #[error("geometry fetch from {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("malformed geometry document: {0}")]
    Parse(String),
}

impl From<FetchError> for ResolutionError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status { url, status } => ResolutionError::Retrieval { url, status },
            FetchError::Transport { url, message } => ResolutionError::Transport { url, message },
        }
    }
}

impl ResolutionError {
    /// HTTP status for retrieval failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResolutionError::Retrieval { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure of a full refresh. Geometry failures are not here: they travel
/// alongside the record in a [`crate::Snapshot`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("failed to fetch feed: {0}")]
    Feed(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
