//! CSV parsing for uploaded sales data.
//!
//! Two upload shapes are understood. The full sales schema carries
//! `date, product_id, units_sold, price` and feeds product filtering and
//! revenue analytics. The minimal series schema carries just a date column
//! and a value column. Column names come from [`ColumnMap`], so uploads
//! with different headers only need configuration, not code.
//!
//! Parsing is fail-fast: the first offending row is reported with its
//! 1-based data-row index (the header row is not counted).

use crate::config::ColumnMap;
use crate::core::{SalesRecord, TimeSeriesRecord};
use crate::error::{Result, ValidationError};
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::Read;

/// Read a full sales history upload.
///
/// Quantities and prices must be finite and non-negative.
pub fn read_sales_csv<R: Read>(
    reader: R,
    columns: &ColumnMap,
) -> Result<Vec<SalesRecord>, ValidationError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = headers(&mut reader)?;
    let date_idx = column_index(&headers, &columns.date)?;
    let product_idx = column_index(&headers, &columns.product)?;
    let value_idx = column_index(&headers, &columns.value)?;
    let price_idx = column_index(&headers, &columns.price)?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row_index = i + 1;
        let row = row.map_err(|e| ValidationError::MalformedCsv(e.to_string()))?;

        let date = parse_date(&row, date_idx, &columns.date, row_index)?;
        let product_id = field(&row, product_idx, &columns.product, row_index)?.to_string();
        let units_sold = parse_number(&row, value_idx, &columns.value, row_index)?;
        let price = parse_number(&row, price_idx, &columns.price, row_index)?;

        non_negative(units_sold, &columns.value, row_index)?;
        non_negative(price, &columns.price, row_index)?;

        records.push(SalesRecord {
            date,
            product_id,
            units_sold,
            price,
        });
    }

    if records.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(records)
}

/// Read a minimal series upload: one date column, one value column.
pub fn read_series_csv<R: Read>(
    reader: R,
    columns: &ColumnMap,
) -> Result<Vec<TimeSeriesRecord>, ValidationError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = headers(&mut reader)?;
    let date_idx = column_index(&headers, &columns.date)?;
    let value_idx = column_index(&headers, &columns.value)?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row_index = i + 1;
        let row = row.map_err(|e| ValidationError::MalformedCsv(e.to_string()))?;

        let date = parse_date(&row, date_idx, &columns.date, row_index)?;
        let value = parse_number(&row, value_idx, &columns.value, row_index)?;
        records.push(TimeSeriesRecord::new(date, value));
    }

    if records.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(records)
}

fn headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<StringRecord, ValidationError> {
    reader
        .headers()
        .map(|h| h.clone())
        .map_err(|e| ValidationError::MalformedCsv(e.to_string()))
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize, ValidationError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ValidationError::MissingColumn {
            column: name.to_string(),
        })
}

fn field<'a>(
    row: &'a StringRecord,
    idx: usize,
    name: &str,
    row_index: usize,
) -> Result<&'a str, ValidationError> {
    match row.get(idx) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ValidationError::MissingField {
            field: name.to_string(),
            row_index,
        }),
    }
}

fn parse_date(
    row: &StringRecord,
    idx: usize,
    name: &str,
    row_index: usize,
) -> Result<NaiveDate, ValidationError> {
    let raw = field(row, idx, name, row_index)?;
    raw.parse().map_err(|_| ValidationError::InvalidDate {
        field: name.to_string(),
        value: raw.to_string(),
        row_index,
    })
}

fn parse_number(
    row: &StringRecord,
    idx: usize,
    name: &str,
    row_index: usize,
) -> Result<f64, ValidationError> {
    let raw = field(row, idx, name, row_index)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::InvalidNumber {
            field: name.to_string(),
            value: raw.to_string(),
            row_index,
        }),
    }
}

fn non_negative(value: f64, name: &str, row_index: usize) -> Result<(), ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::NegativeValue {
            field: name.to_string(),
            value,
            row_index,
        });
    }
    Ok(())
}
