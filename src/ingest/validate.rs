//! Normalization and dataset-level validation.
//!
//! Parsed rows arrive in upload order. Normalization sorts them by date;
//! the dataset constructor then enforces the ordering invariants
//! (uniqueness and gap tolerance). Row indices reported from this stage
//! refer to the normalized order.

use crate::config::PipelineConfig;
use crate::core::{SalesRecord, TimeSeriesDataset, TimeSeriesRecord};
use crate::error::{Result, ValidationError};

/// Normalize parsed observations into a validated dataset.
pub fn validate(
    mut records: Vec<TimeSeriesRecord>,
    config: &PipelineConfig,
) -> Result<TimeSeriesDataset, ValidationError> {
    records.sort_by_key(|r| r.date);
    TimeSeriesDataset::from_records(records, config.max_gap_days)
}

/// Extract one product's history from a sales upload.
///
/// A product with no rows is a validation failure, mirroring the
/// not-found response the serving layer turns it into.
pub fn product_series(
    records: &[SalesRecord],
    product_id: &str,
) -> Result<Vec<TimeSeriesRecord>, ValidationError> {
    let series: Vec<TimeSeriesRecord> = records
        .iter()
        .filter(|r| r.product_id == product_id)
        .map(|r| TimeSeriesRecord::new(r.date, r.units_sold))
        .collect();

    if series.is_empty() {
        return Err(ValidationError::UnknownProduct {
            product_id: product_id.to_string(),
        });
    }
    Ok(series)
}

/// Distinct product ids in upload order of first appearance.
pub fn products(records: &[SalesRecord]) -> Vec<String> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.iter().any(|p| p == &record.product_id) {
            seen.push(record.product_id.clone());
        }
    }
    seen
}
