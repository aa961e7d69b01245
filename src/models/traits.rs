//! The forecasting capability seam.

use crate::core::{Forecast, TimeSeriesDataset};
use crate::error::{ForecastError, Result};

/// Opaque forecasting capability: fit a model on history, then predict.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
/// The pipeline creates one instance per invocation, so implementations
/// need no interior synchronization.
pub trait Forecaster {
    /// Fit the model to a validated dataset.
    fn fit(&mut self, dataset: &TimeSeriesDataset) -> Result<(), ForecastError>;

    /// Generate point predictions for the specified horizon.
    fn predict(&self, horizon: usize) -> Result<Forecast, ForecastError>;

    /// Generate predictions with interval bounds at the given level.
    fn predict_with_intervals(
        &self,
        horizon: usize,
        level: f64,
    ) -> Result<Forecast, ForecastError> {
        // Capabilities without native intervals fall back to points
        let _ = level;
        self.predict(horizon)
    }

    /// In-sample predictions, once fitted.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Residuals (actual - fitted), once fitted.
    fn residuals(&self) -> Option<&[f64]>;

    /// Model name for logs and summaries.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster>;

/// Factory producing a fresh model per pipeline invocation.
pub type ForecasterFactory = Box<dyn Fn() -> BoxedForecaster + Send + Sync>;
