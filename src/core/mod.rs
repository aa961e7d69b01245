//! Core data structures for the ingestion-and-forecast pipeline.

mod dataset;
mod forecast;

pub use dataset::{SalesRecord, TimeSeriesDataset, TimeSeriesRecord};
pub use forecast::{Forecast, ForecastResult, ForecastRow};
