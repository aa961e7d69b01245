//! # oracle-forecast
//!
//! Sales ingestion-and-forecast pipeline: parse and validate uploaded
//! sales history, forecast future periods with uncertainty bounds through
//! an injected forecasting capability, derive trend insights and
//! historical analytics, and export results as CSV.
//!
//! The pipeline is stateless: each invocation validates one dataset,
//! fits one fresh model, and returns one result. Authentication and
//! persistence belong to the hosting service; the crate consumes them
//! through [`storage::Identity`] and the [`storage::Storage`] trait.
//!
//! ```
//! use oracle_forecast::config::PipelineConfig;
//! use oracle_forecast::pipeline::ForecastPipeline;
//!
//! let config = PipelineConfig {
//!     min_observations: 3,
//!     ..PipelineConfig::default()
//! };
//! let pipeline = ForecastPipeline::new(config);
//!
//! let csv = "date,units_sold\n\
//!            2024-01-01,100\n\
//!            2024-01-02,110\n\
//!            2024-01-03,105\n\
//!            2024-01-04,102\n\
//!            2024-01-05,108\n\
//!            2024-01-06,111\n\
//!            2024-01-07,104\n";
//! let result = pipeline.run_csv(csv.as_bytes(), 7).unwrap();
//! assert_eq!(result.horizon(), 7);
//! ```

pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod stats;
pub mod storage;

pub use error::{ForecastError, PipelineError, Result, ValidationError};

pub mod prelude {
    pub use crate::analysis::{generate_insight, HistoricalAnalysis, Insight, Trend};
    pub use crate::config::{ColumnMap, PipelineConfig};
    pub use crate::core::{
        Forecast, ForecastResult, ForecastRow, SalesRecord, TimeSeriesDataset, TimeSeriesRecord,
    };
    pub use crate::error::{ForecastError, PipelineError, Result, ValidationError};
    pub use crate::export::{forecast_csv_bytes, write_forecast_csv};
    pub use crate::ingest::{read_sales_csv, read_series_csv, validate};
    pub use crate::models::{BoxedForecaster, Forecaster, Naive, SeasonalNaive};
    pub use crate::pipeline::{ForecastPipeline, ProductForecast};
    pub use crate::storage::{FsStorage, Identity, MemoryStorage, Storage};
}
