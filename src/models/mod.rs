//! Forecasting models.
//!
//! The [`Forecaster`] trait is the seam the pipeline injects a capability
//! through; the baseline models behind it are simple, dependable
//! reference implementations.

mod naive;
mod seasonal_naive;
mod traits;

pub use naive::Naive;
pub use seasonal_naive::SeasonalNaive;
pub use traits::{BoxedForecaster, Forecaster, ForecasterFactory};
