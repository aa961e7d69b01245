//! Seasonal Naive forecasting model.
//!
//! Forecasts by repeating the value from the same season in the previous
//! cycle. With daily sales data and the default weekly period, next
//! Monday's prediction is last Monday's observation.

use crate::core::{Forecast, TimeSeriesDataset};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::stats::quantile_normal;

/// Seasonal Naive forecaster.
#[derive(Debug, Clone)]
pub struct SeasonalNaive {
    period: usize,
    history: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_variance: Option<f64>,
}

impl SeasonalNaive {
    /// Create a new SeasonalNaive model with the given seasonal period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            history: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
        }
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for SeasonalNaive {
    fn default() -> Self {
        Self::new(7) // Weekly cycle for daily sales
    }
}

impl Forecaster for SeasonalNaive {
    fn fit(&mut self, dataset: &TimeSeriesDataset) -> Result<(), ForecastError> {
        let values = dataset.values();
        if values.len() < self.period {
            return Err(ForecastError::InsufficientHistory {
                needed: self.period,
                got: values.len(),
            });
        }

        self.history = Some(values.to_vec());

        // Fitted values: y_hat[t] = y[t - period]
        let fitted: Vec<f64> = (0..values.len())
            .map(|i| {
                if i < self.period {
                    f64::NAN
                } else {
                    values[i - self.period]
                }
            })
            .collect();

        // Residuals: y[t] - y[t - period]
        let residuals: Vec<f64> = (0..values.len())
            .map(|i| {
                if i < self.period {
                    f64::NAN
                } else {
                    values[i] - values[i - self.period]
                }
            })
            .collect();

        let valid: Vec<f64> = residuals.iter().copied().filter(|r| !r.is_nan()).collect();
        if !valid.is_empty() {
            let variance = valid.iter().map(|r| r * r).sum::<f64>() / valid.len() as f64;
            self.residual_variance = Some(variance);
        }

        self.fitted = Some(fitted);
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast, ForecastError> {
        let history = self.history.as_ref().ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let n = history.len();
        let predictions: Vec<f64> = (0..horizon)
            .map(|h| history[n - self.period + (h % self.period)])
            .collect();

        Ok(Forecast::from_values(predictions))
    }

    fn predict_with_intervals(
        &self,
        horizon: usize,
        level: f64,
    ) -> Result<Forecast, ForecastError> {
        let history = self.history.as_ref().ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let sigma = self.residual_variance.unwrap_or(0.0).sqrt();
        let z = quantile_normal((1.0 + level) / 2.0);
        let n = history.len();

        let mut predictions = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for h in 0..horizon {
            let pred = history[n - self.period + (h % self.period)];
            predictions.push(pred);

            // Standard error grows with the number of complete seasons ahead
            let k = (h / self.period) + 1;
            let se = sigma * (k as f64).sqrt();
            lower.push(pred - z * se);
            upper.push(pred + z * se);
        }

        Ok(Forecast::from_values_with_intervals(
            predictions,
            lower,
            upper,
        ))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "SeasonalNaive"
    }
}
