//! Forecast output structures.
//!
//! [`Forecast`] is what a forecasting capability hands back: point
//! predictions and optional interval bounds, with no notion of calendar
//! time. The pipeline attaches dates and freezes the result into a
//! [`ForecastResult`].

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Raw capability output: point predictions with optional intervals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions only.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            point: values,
            lower: None,
            upper: None,
        }
    }

    /// Create a forecast with prediction intervals.
    pub fn from_values_with_intervals(
        values: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> Self {
        Self {
            point: values,
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// Check if forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Point predictions.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Lower interval bounds, if the capability produced them.
    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    /// Upper interval bounds, if the capability produced them.
    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    /// Whether both interval bounds are present.
    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }
}

/// One forecasted period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Dated forecast for a fixed horizon. Read-only after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    rows: Vec<ForecastRow>,
}

impl ForecastResult {
    /// Attach dates to a capability forecast.
    ///
    /// Fails with a shape mismatch when the capability returned a
    /// different number of steps than there are dates, or when interval
    /// lengths disagree with the point predictions. A forecast without
    /// intervals gets degenerate bounds equal to the point prediction.
    pub fn from_forecast(
        dates: Vec<NaiveDate>,
        forecast: &Forecast,
    ) -> Result<Self, ForecastError> {
        let horizon = dates.len();
        if forecast.horizon() != horizon {
            return Err(ForecastError::ShapeMismatch {
                expected: horizon,
                got: forecast.horizon(),
            });
        }
        for bounds in [forecast.lower(), forecast.upper()].into_iter().flatten() {
            if bounds.len() != horizon {
                return Err(ForecastError::ShapeMismatch {
                    expected: horizon,
                    got: bounds.len(),
                });
            }
        }

        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ForecastError::Upstream(
                    "forecast dates must be strictly increasing".to_string(),
                ));
            }
        }

        let point = forecast.point();
        let rows = (0..horizon)
            .map(|i| ForecastRow {
                date: dates[i],
                predicted: point[i],
                lower: forecast.lower().map_or(point[i], |l| l[i]),
                upper: forecast.upper().map_or(point[i], |u| u[i]),
            })
            .collect();

        Ok(Self { rows })
    }

    /// Number of forecasted periods.
    pub fn horizon(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Forecast rows, date-ascending.
    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    /// Iterate over rows.
    pub fn iter(&self) -> impl Iterator<Item = &ForecastRow> {
        self.rows.iter()
    }

    /// Date of the last forecasted period.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// Point predictions in date order.
    pub fn predicted(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.predicted).collect()
    }
}
