//! Pipeline orchestration: validate, forecast, summarize.
//!
//! Each invocation is a pure request/response transformation. A fresh
//! model instance is created per call, so a pipeline shared across
//! requests needs no locking of its own.

use crate::analysis::{generate_insight, Insight};
use crate::config::PipelineConfig;
use crate::core::{ForecastResult, SalesRecord, TimeSeriesDataset};
use crate::error::{ForecastError, Result};
use crate::ingest;
use crate::models::{ForecasterFactory, SeasonalNaive};
use std::io::Read;
use tracing::{debug, info};

/// Forecast of one product, with its validated history and insight.
#[derive(Debug, Clone)]
pub struct ProductForecast {
    pub product_id: String,
    pub history: TimeSeriesDataset,
    pub forecast: ForecastResult,
    pub insight: Insight,
}

/// The ingestion-and-forecast pipeline.
pub struct ForecastPipeline {
    config: PipelineConfig,
    factory: ForecasterFactory,
}

impl ForecastPipeline {
    /// Pipeline with the default capability: seasonal naive at the
    /// configured period.
    pub fn new(config: PipelineConfig) -> Self {
        let period = config.seasonal_period;
        Self::with_forecaster(config, Box::new(move || Box::new(SeasonalNaive::new(period))))
    }

    /// Pipeline with an injected forecasting capability.
    pub fn with_forecaster(config: PipelineConfig, factory: ForecasterFactory) -> Self {
        Self { config, factory }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Validate and forecast a minimal `date,value` CSV upload.
    pub fn run_csv<R: Read>(&self, reader: R, horizon: usize) -> Result<ForecastResult> {
        let records = ingest::read_series_csv(reader, &self.config.columns)?;
        let dataset = ingest::validate(records, &self.config)?;
        Ok(self.forecast(&dataset, horizon)?)
    }

    /// Forecast one product out of a full sales upload.
    pub fn forecast_product(
        &self,
        records: &[SalesRecord],
        product_id: &str,
        horizon: usize,
    ) -> Result<ProductForecast> {
        let series = ingest::product_series(records, product_id)?;
        let history = ingest::validate(series, &self.config)?;
        let forecast = self.forecast(&history, horizon)?;
        let insight = generate_insight(product_id, &history, &forecast);

        Ok(ProductForecast {
            product_id: product_id.to_string(),
            history,
            forecast,
            insight,
        })
    }

    /// Forecast a validated dataset over `horizon` future periods.
    ///
    /// The result contains exactly `horizon` rows whose dates strictly
    /// increase from the period immediately after the last observation.
    pub fn forecast(
        &self,
        dataset: &TimeSeriesDataset,
        horizon: usize,
    ) -> Result<ForecastResult, ForecastError> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon(
                "horizon must be positive".to_string(),
            ));
        }
        if dataset.len() < self.config.min_observations {
            return Err(ForecastError::InsufficientHistory {
                needed: self.config.min_observations,
                got: dataset.len(),
            });
        }

        let dates = dataset.future_dates(horizon)?;

        let mut model = (self.factory)();
        debug!(
            model = model.name(),
            observations = dataset.len(),
            horizon,
            "fitting forecaster"
        );
        model.fit(dataset)?;
        let forecast = model.predict_with_intervals(horizon, self.config.interval_level)?;
        let result = ForecastResult::from_forecast(dates, &forecast)?;

        info!(
            model = model.name(),
            horizon = result.horizon(),
            last_date = %result.last_date().expect("horizon is positive"),
            "forecast complete"
        );
        Ok(result)
    }

    /// Validate, forecast, and export in one call: the CSV-in, CSV-out
    /// path of the service.
    pub fn run_csv_to_csv<R: Read>(&self, reader: R, horizon: usize) -> Result<Vec<u8>> {
        let result = self.run_csv(reader, horizon)?;
        crate::export::forecast_csv_bytes(&result)
    }
}

impl std::fmt::Debug for ForecastPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Wrap a foreign capability's error into the pipeline error space.
pub fn upstream_failure(err: impl std::fmt::Display) -> ForecastError {
    ForecastError::Upstream(err.to_string())
}
