//! Naive forecasting model.
//!
//! Forecasts the last observed value for every future period.

use crate::core::{Forecast, TimeSeriesDataset};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::stats::quantile_normal;

/// Naive forecaster that repeats the last value.
#[derive(Debug, Clone, Default)]
pub struct Naive {
    last_value: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl Naive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Forecaster for Naive {
    fn fit(&mut self, dataset: &TimeSeriesDataset) -> Result<(), ForecastError> {
        let values = dataset.values();
        if values.is_empty() {
            return Err(ForecastError::InsufficientHistory { needed: 1, got: 0 });
        }

        self.last_value = Some(*values.last().unwrap());

        // Fitted values are shifted history (y_hat[t] = y[t-1])
        let mut fitted = Vec::with_capacity(values.len());
        fitted.push(f64::NAN);
        fitted.extend_from_slice(&values[..values.len() - 1]);
        self.fitted = Some(fitted);

        // Residuals are first differences (y[t] - y[t-1])
        let residuals: Vec<f64> = (0..values.len())
            .map(|i| {
                if i == 0 {
                    f64::NAN
                } else {
                    values[i] - values[i - 1]
                }
            })
            .collect();
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast, ForecastError> {
        let last = self.last_value.ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        Ok(Forecast::from_values(vec![last; horizon]))
    }

    fn predict_with_intervals(
        &self,
        horizon: usize,
        level: f64,
    ) -> Result<Forecast, ForecastError> {
        let last = self.last_value.ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let residuals = self.residuals.as_ref().ok_or(ForecastError::FitRequired)?;
        let valid: Vec<f64> = residuals.iter().copied().filter(|r| !r.is_nan()).collect();

        if valid.is_empty() {
            return Ok(Forecast::from_values(vec![last; horizon]));
        }

        let variance = valid.iter().map(|r| r * r).sum::<f64>() / valid.len() as f64;
        let sigma = variance.sqrt();
        let z = quantile_normal((1.0 + level) / 2.0);

        let mut predictions = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for h in 1..=horizon {
            predictions.push(last);
            // Interval widens with sqrt(steps ahead)
            let se = sigma * (h as f64).sqrt();
            lower.push(last - z * se);
            upper.push(last + z * se);
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
        "Naive"
    }
}
