//! Pipeline configuration.
//!
//! All policy knobs live here and are passed explicitly at construction
//! time. The library installs no globals; a host process builds one
//! [`PipelineConfig`] at startup (typically deserialized from its own
//! configuration layer) and hands it to the pipeline.

use serde::Deserialize;

/// Names of the columns the upload is expected to carry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    /// Date column (parsed as `%Y-%m-%d`).
    pub date: String,
    /// Product identifier column.
    pub product: String,
    /// Quantity column forecasts are computed over.
    pub value: String,
    /// Unit price column, used for revenue analytics.
    pub price: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            product: "product_id".to_string(),
            value: "units_sold".to_string(),
            price: "price".to_string(),
        }
    }
}

/// Policy settings for one pipeline instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Column names expected in uploads.
    pub columns: ColumnMap,
    /// Minimum number of observations a product needs before it can be
    /// forecast.
    pub min_observations: usize,
    /// Horizon used when the caller does not pass one explicitly.
    pub default_horizon: usize,
    /// Confidence level for prediction intervals (0 < level < 1).
    pub interval_level: f64,
    /// Seasonal period handed to seasonal models. 7 matches daily sales
    /// data with a weekly cycle.
    pub seasonal_period: usize,
    /// Largest tolerated gap, in days, between consecutive observations.
    /// `None` accepts arbitrary gaps.
    pub max_gap_days: Option<i64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
            min_observations: 30,
            default_horizon: 30,
            interval_level: 0.95,
            seasonal_period: 7,
            max_gap_days: None,
        }
    }
}
