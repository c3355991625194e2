use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::geometry::{check_latitude, check_longitude, LatLon};
use crate::record::{assemble, ImpactRecord, ImpactRecordFields};

use super::{schema::{Column, SourceFeed}, sdg::SdgTags};

/// Which feed row becomes the record.
///
/// The feed is append-only, so the newest entry is the last row. Rows are
/// never sorted or deduplicated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowSelector {
    #[default]
    Last,
    Index(usize),
}

impl RowSelector {
    fn row(self, height: usize) -> Result<usize, ExtractionError> {
        match self {
            RowSelector::Last => Ok(height - 1),
            RowSelector::Index(index) if index < height => Ok(index),
            RowSelector::Index(index) => Err(ExtractionError::RowOutOfRange { index, rows: height }),
        }
    }
}

/// Extract one row as a record with no boundaries attached.
pub fn extract(feed: &SourceFeed, selector: RowSelector) -> Result<ImpactRecord, ExtractionError> {
    Ok(assemble(extract_fields(feed, selector)?, Vec::new()))
}

/// Validate and type one feed row.
pub fn extract_fields(feed: &SourceFeed, selector: RowSelector) -> Result<ImpactRecordFields, ExtractionError> {
    if feed.is_empty() {
        return Err(ExtractionError::EmptyFeed);
    }
    check_schema(feed)?;
    let row = Row { feed, index: selector.row(feed.height())? };

    let lat = row.coordinate(Column::Latitude, check_latitude)?;
    let lon = row.coordinate(Column::Longitude, check_longitude)?;

    Ok(ImpactRecordFields {
        location: LatLon { lat, lon },
        token_type: row.text(Column::TokenType),
        description: row.text(Column::Description),
        external_url: row.text(Column::ExternalUrl),
        project_name: row.text(Column::StartingProject),
        unit: row.text(Column::Unit),
        deliverable: row.text(Column::Deliverable),
        duration_years: row.duration(Column::YearsDuration)?,
        impact_type: row.text(Column::ImpactType),
        sdgs: SdgTags::parse(&row.text(Column::Sdgs)),
        implementer_partner: row.text(Column::ImplementerPartner),
        internal_verification: row.text(Column::InternalVerification),
        local_verification: row.text(Column::LocalVerification),
        imv_document: row.text(Column::ImvDocument),
        geometry_ref: row.raw(Column::Kml)
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string),
    })
}

/// First required column absent from the feed, by canonical header.
fn check_schema(feed: &SourceFeed) -> Result<(), ExtractionError> {
    match Column::REQUIRED.iter().find(|column| feed.find(**column).is_none()) {
        Some(column) => Err(ExtractionError::Schema { column: column.header().to_string() }),
        None => Ok(()),
    }
}

struct Row<'a> {
    feed: &'a SourceFeed,
    index: usize,
}

impl<'a> Row<'a> {
    fn raw(&self, column: Column) -> Option<&'a str> {
        self.feed.cell(self.feed.find(column)?, self.index)
    }

    fn text(&self, column: Column) -> String {
        self.raw(column).unwrap_or_default().to_string()
    }

    fn invalid(&self, column: Column, value: &str, reason: impl Into<String>) -> ExtractionError {
        ExtractionError::FieldValidation {
            field: column.header().to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn coordinate(&self, column: Column, check: fn(f64) -> Result<f64, String>) -> Result<f64, ExtractionError> {
        let raw = self.raw(column).unwrap_or_default();
        if raw.trim().is_empty() {
            return Err(self.invalid(column, raw, "missing value"));
        }
        let value = raw.trim().parse::<f64>()
            .map_err(|_| self.invalid(column, raw, "not a number"))?;
        check(value).map_err(|reason| self.invalid(column, raw, reason))
    }

    /// Whole, non-negative years; blank means absent.
    fn duration(&self, column: Column) -> Result<Option<u32>, ExtractionError> {
        let raw = self.raw(column).unwrap_or_default();
        let trimmed = raw.trim();
        if trimmed.is_empty() { return Ok(None) }

        if let Ok(years) = trimmed.parse::<u32>() {
            return Ok(Some(years));
        }
        // Spreadsheet exports write integers as "5.0".
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v < 0.0 => Err(self.invalid(column, raw, "must be non-negative")),
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(Some(v as u32)),
            Ok(_) => Err(self.invalid(column, raw, "not a whole number of years")),
            Err(_) => Err(self.invalid(column, raw, "not a number")),
        }
    }
}
