//! Forecast export as a tabular byte stream.
//!
//! Serialization is deterministic: fixed column order, dates as
//! `%Y-%m-%d`, floats in Rust's shortest round-trip form. I/O failures
//! surface as-is; there is nothing to recover here.

use crate::core::ForecastResult;
use crate::error::Result;
use std::io::Write;

/// Column order of the exported file.
pub const EXPORT_HEADER: [&str; 4] = ["timestamp", "predicted_value", "lower_bound", "upper_bound"];

/// Write a forecast as CSV, one row per period, timestamp ascending.
pub fn write_forecast_csv<W: Write>(result: &ForecastResult, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(EXPORT_HEADER)?;

    for row in result.iter() {
        writer.write_record(&[
            row.date.format("%Y-%m-%d").to_string(),
            row.predicted.to_string(),
            row.lower.to_string(),
            row.upper.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Serialize a forecast into an in-memory CSV byte buffer.
pub fn forecast_csv_bytes(result: &ForecastResult) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_forecast_csv(result, &mut buffer)?;
    Ok(buffer)
}

/// Download filename the serving layer attaches to an export.
pub fn export_filename(product_id: &str) -> String {
    format!("forecast_{product_id}.csv")
}
