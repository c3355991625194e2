use std::path::Path;

use polars::prelude::{Column as FrameColumn, DataFrame, DataType, PolarsResult};

use crate::error::ExtractionError;
use crate::io::csv::{read_csv, read_csv_bytes};

/// Feed columns the extractor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Latitude,
    Longitude,
    TokenType,
    Description,
    ExternalUrl,
    StartingProject,
    Unit,
    Deliverable,
    YearsDuration,
    ImpactType,
    Sdgs,
    ImplementerPartner,
    InternalVerification,
    LocalVerification,
    ImvDocument,
    Kml,                // Optional
}

impl Column {
    /// Every column a feed must carry, in the order they are checked.
    pub const REQUIRED: [Column; 15] = [
        Column::Latitude,
        Column::Longitude,
        Column::TokenType,
        Column::Description,
        Column::ExternalUrl,
        Column::StartingProject,
        Column::Unit,
        Column::Deliverable,
        Column::YearsDuration,
        Column::ImpactType,
        Column::Sdgs,
        Column::ImplementerPartner,
        Column::InternalVerification,
        Column::LocalVerification,
        Column::ImvDocument,
    ];

    /// Canonical header, as spelled in the live feed.
    pub fn header(&self) -> &'static str { self.aliases()[0] }

    /// Headers accepted for this column, canonical first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::Latitude => &["Latitude"],
            Column::Longitude => &["Longitude"],
            Column::TokenType => &["Type of Token"],
            Column::Description => &["description"],
            Column::ExternalUrl => &["external_url"],
            Column::StartingProject => &["Starting Project"],
            Column::Unit => &["Unit"],
            Column::Deliverable => &["Deleverable", "Deliverable"],
            Column::YearsDuration => &["Years_Duration"],
            Column::ImpactType => &["Impact Type"],
            Column::Sdgs => &["SDGs"],
            Column::ImplementerPartner => &["Implementer Partner"],
            Column::InternalVerification => &["Internal Verification"],
            Column::LocalVerification => &["Local Verification"],
            Column::ImvDocument => &["Imv_Document"],
            Column::Kml => &["KML"],
        }
    }
}

/// Read-only tabular feed. Every cell is held as text so the extractor sees
/// the raw value it is validating.
#[derive(Debug, Clone)]
pub struct SourceFeed {
    df: DataFrame,
}

impl SourceFeed {
    /// Parse CSV bytes (header row required).
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, ExtractionError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self { df: DataFrame::empty() });
        }
        read_csv_bytes(bytes)
            .map(|df| Self { df })
            .map_err(|e| ExtractionError::Malformed(format!("{e:#}")))
    }

    /// Read a CSV file from disk.
    pub fn read_csv(path: &Path) -> Result<Self, ExtractionError> {
        read_csv(path)
            .map(|df| Self { df })
            .map_err(|e| ExtractionError::Malformed(format!("{e:#}")))
    }

    /// Wrap an existing frame, casting every column to text.
    pub fn from_dataframe(df: DataFrame) -> Result<Self, ExtractionError> {
        let columns = df.get_columns().iter()
            .map(|col| col.cast(&DataType::String))
            .collect::<PolarsResult<Vec<FrameColumn>>>()
            .and_then(DataFrame::new)
            .map_err(|e| ExtractionError::Malformed(e.to_string()))?;
        Ok(Self { df: columns })
    }

    /// Number of rows.
    pub fn height(&self) -> usize { self.df.height() }

    pub fn is_empty(&self) -> bool { self.df.height() == 0 }

    pub fn column_names(&self) -> Vec<&str> {
        self.df.get_column_names().into_iter().map(|name| name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_index(name).is_some()
    }

    /// The header under which `column` appears in this feed, if any.
    pub fn find(&self, column: Column) -> Option<&'static str> {
        column.aliases().iter().copied().find(|name| self.has_column(name))
    }

    /// Raw text of one cell; `None` for a null cell or unknown column.
    pub fn cell(&self, header: &str, row: usize) -> Option<&str> {
        self.df.column(header).ok()?.str().ok()?.get(row)
    }
}
