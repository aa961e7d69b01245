//! Error types for the forecasting pipeline.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for pipeline operations.
///
/// Defaults to [`PipelineError`]; stage-level functions narrow the error
/// parameter to [`ValidationError`] or [`ForecastError`].
pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

/// Errors raised while parsing and validating uploaded sales data.
///
/// Row-level variants carry the 1-based index of the first offending data
/// row (the header row is not counted). Validation is fail-fast: the first
/// problem encountered is the one reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The upload contained no data rows.
    #[error("empty input: no data rows")]
    EmptyInput,

    /// A required column is absent from the header.
    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    /// A row is missing a required field or the field is blank.
    #[error("row {row_index}: missing value for '{field}'")]
    MissingField { field: String, row_index: usize },

    /// A date field failed to parse.
    #[error("row {row_index}: cannot parse '{value}' as a date in '{field}'")]
    InvalidDate {
        field: String,
        value: String,
        row_index: usize,
    },

    /// A numeric field failed to parse or is not finite.
    #[error("row {row_index}: cannot parse '{value}' as a finite number in '{field}'")]
    InvalidNumber {
        field: String,
        value: String,
        row_index: usize,
    },

    /// A quantity or price is negative.
    #[error("row {row_index}: '{field}' cannot be negative, got {value}")]
    NegativeValue {
        field: String,
        value: f64,
        row_index: usize,
    },

    /// The requested product has no rows in the upload.
    #[error("product '{product_id}' not found in upload")]
    UnknownProduct { product_id: String },

    /// Two rows share the same date after normalization.
    #[error("row {row_index}: duplicate date {date}")]
    DuplicateDate { date: NaiveDate, row_index: usize },

    /// Dates handed to the dataset constructor were not sorted.
    #[error("row {row_index}: dates must be strictly increasing")]
    OutOfOrderDate { row_index: usize },

    /// A gap between consecutive dates exceeds the configured tolerance.
    #[error("gap of {gap_days} days before {date} exceeds the allowed {max_gap_days}")]
    GapTooLarge {
        date: NaiveDate,
        gap_days: i64,
        max_gap_days: i64,
    },

    /// The CSV itself is malformed (unbalanced quotes, ragged rows, ...).
    #[error("malformed csv: {0}")]
    MalformedCsv(String),
}

impl ValidationError {
    /// The 1-based data row this error points at, where one applies.
    pub fn row_index(&self) -> Option<usize> {
        match self {
            Self::MissingField { row_index, .. }
            | Self::InvalidDate { row_index, .. }
            | Self::InvalidNumber { row_index, .. }
            | Self::NegativeValue { row_index, .. }
            | Self::DuplicateDate { row_index, .. }
            | Self::OutOfOrderDate { row_index } => Some(*row_index),
            _ => None,
        }
    }
}

/// Errors raised while producing a forecast from a validated dataset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// The dataset is too small for the model or the configured gate.
    #[error("insufficient history: need at least {needed}, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    /// The requested horizon is not usable.
    #[error("invalid horizon: {0}")]
    InvalidHorizon(String),

    /// Prediction was requested before fitting.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// The history defeats the model (e.g. a capability that rejects
    /// constant series).
    #[error("degenerate history: {0}")]
    DegenerateHistory(String),

    /// The spacing of historical dates could not be turned into a cadence
    /// for future timestamps.
    #[error("could not infer cadence: {0}")]
    CadenceInference(String),

    /// A capability returned output whose shape disagrees with the request.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// The injected forecasting capability failed for its own reasons.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

/// Top-level pipeline error: any stage failure plus export I/O.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Export or storage I/O failure, surfaced as-is.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failure during export.
    #[error("csv write error: {0}")]
    CsvWrite(#[from] csv::Error),
}
