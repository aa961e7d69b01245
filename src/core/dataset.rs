//! Validated time-series dataset types.

use crate::error::{ForecastError, Result, ValidationError};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// One parsed row of an uploaded sales history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product_id: String,
    pub units_sold: f64,
    pub price: f64,
}

impl SalesRecord {
    /// Revenue contributed by this row.
    pub fn revenue(&self) -> f64 {
        self.units_sold * self.price
    }
}

/// A single validated observation: a date and a finite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesRecord {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesRecord {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A validated, ordered historical series.
///
/// Owned by a single pipeline invocation. Construction enforces the
/// dataset invariants: dates strictly increasing, no duplicates, and no
/// gap wider than the caller's tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesDataset {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeriesDataset {
    /// Build a dataset from already-sorted observations.
    ///
    /// `max_gap_days: None` accepts arbitrary gaps. The index reported for
    /// a violation is the 1-based position of the offending record.
    pub fn from_records(
        records: Vec<TimeSeriesRecord>,
        max_gap_days: Option<i64>,
    ) -> Result<Self, ValidationError> {
        if records.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        for i in 1..records.len() {
            let prev = records[i - 1].date;
            let curr = records[i].date;
            if curr == prev {
                return Err(ValidationError::DuplicateDate {
                    date: curr,
                    row_index: i + 1,
                });
            }
            if curr < prev {
                return Err(ValidationError::OutOfOrderDate { row_index: i + 1 });
            }
            if let Some(max_gap) = max_gap_days {
                let gap = (curr - prev).num_days();
                if gap > max_gap {
                    return Err(ValidationError::GapTooLarge {
                        date: curr,
                        gap_days: gap,
                        max_gap_days: max_gap,
                    });
                }
            }
        }

        let (dates, values) = records.into_iter().map(|r| (r.date, r.value)).unzip();
        Ok(Self { dates, values })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// A dataset is never constructed empty, but the accessor keeps the
    /// conventional pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observation dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observation values, aligned with `dates`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First observation date.
    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Last observation date.
    pub fn last_date(&self) -> NaiveDate {
        *self.dates.last().expect("dataset is never empty")
    }

    /// Iterate observations as records.
    pub fn iter(&self) -> impl Iterator<Item = TimeSeriesRecord> + '_ {
        self.dates
            .iter()
            .zip(self.values.iter())
            .map(|(&date, &value)| TimeSeriesRecord::new(date, value))
    }

    /// Infer the cadence of the series as a number of days.
    ///
    /// Uses the most common gap between consecutive dates; ties resolve to
    /// the smaller gap. Daily sales data with occasional holes therefore
    /// still forecasts day-by-day.
    pub fn step_days(&self) -> Result<i64, ForecastError> {
        if self.len() < 2 {
            return Err(ForecastError::CadenceInference(
                "need at least 2 observations".to_string(),
            ));
        }

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for pair in self.dates.windows(2) {
            let gap = (pair[1] - pair[0]).num_days();
            *counts.entry(gap).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .max_by(|(gap_a, count_a), (gap_b, count_b)| {
                count_a.cmp(count_b).then(gap_b.cmp(gap_a))
            })
            .map(|(gap, _)| gap)
            .ok_or_else(|| {
                ForecastError::CadenceInference("no date gaps to inspect".to_string())
            })
    }

    /// Dates for the next `horizon` periods, strictly increasing and
    /// immediately following the last observation at the inferred cadence.
    pub fn future_dates(&self, horizon: usize) -> Result<Vec<NaiveDate>, ForecastError> {
        let step = self.step_days()?;
        let last = self.last_date();
        Ok((1..=horizon as i64)
            .map(|k| last + Duration::days(step * k))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn daily_records(start: &str, values: &[f64]) -> Vec<TimeSeriesRecord> {
        let start = d(start);
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesRecord::new(start + Duration::days(i as i64), v))
            .collect()
    }

    #[test]
    fn dataset_accepts_strictly_increasing_dates() {
        let records = daily_records("2024-01-01", &[100.0, 110.0, 105.0]);
        let dataset = TimeSeriesDataset::from_records(records, None).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.first_date(), d("2024-01-01"));
        assert_eq!(dataset.last_date(), d("2024-01-03"));
        assert_eq!(dataset.values(), &[100.0, 110.0, 105.0]);
    }

    #[test]
    fn dataset_rejects_empty_input() {
        let err = TimeSeriesDataset::from_records(vec![], None).unwrap_err();
        assert_eq!(err, ValidationError::EmptyInput);
    }

    #[test]
    fn dataset_rejects_duplicate_dates() {
        let records = vec![
            TimeSeriesRecord::new(d("2024-01-01"), 1.0),
            TimeSeriesRecord::new(d("2024-01-02"), 2.0),
            TimeSeriesRecord::new(d("2024-01-02"), 3.0),
        ];
        let err = TimeSeriesDataset::from_records(records, None).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateDate {
                date: d("2024-01-02"),
                row_index: 3,
            }
        );
    }

    #[test]
    fn dataset_rejects_out_of_order_dates() {
        let records = vec![
            TimeSeriesRecord::new(d("2024-01-02"), 1.0),
            TimeSeriesRecord::new(d("2024-01-01"), 2.0),
        ];
        let err = TimeSeriesDataset::from_records(records, None).unwrap_err();
        assert_eq!(err, ValidationError::OutOfOrderDate { row_index: 2 });
    }

    #[test]
    fn dataset_enforces_gap_tolerance_when_configured() {
        let records = vec![
            TimeSeriesRecord::new(d("2024-01-01"), 1.0),
            TimeSeriesRecord::new(d("2024-01-02"), 2.0),
            TimeSeriesRecord::new(d("2024-01-10"), 3.0),
        ];

        // Unlimited tolerance accepts the hole
        assert!(TimeSeriesDataset::from_records(records.clone(), None).is_ok());

        let err = TimeSeriesDataset::from_records(records, Some(3)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::GapTooLarge {
                date: d("2024-01-10"),
                gap_days: 8,
                max_gap_days: 3,
            }
        );
    }

    #[test]
    fn step_days_uses_the_modal_gap() {
        // Daily cadence with one 3-day hole
        let records = vec![
            TimeSeriesRecord::new(d("2024-01-01"), 1.0),
            TimeSeriesRecord::new(d("2024-01-02"), 2.0),
            TimeSeriesRecord::new(d("2024-01-03"), 3.0),
            TimeSeriesRecord::new(d("2024-01-06"), 4.0),
            TimeSeriesRecord::new(d("2024-01-07"), 5.0),
        ];
        let dataset = TimeSeriesDataset::from_records(records, None).unwrap();
        assert_eq!(dataset.step_days().unwrap(), 1);
    }

    #[test]
    fn step_days_tie_breaks_toward_the_smaller_gap() {
        let records = vec![
            TimeSeriesRecord::new(d("2024-01-01"), 1.0),
            TimeSeriesRecord::new(d("2024-01-02"), 2.0),
            TimeSeriesRecord::new(d("2024-01-09"), 3.0),
        ];
        let dataset = TimeSeriesDataset::from_records(records, None).unwrap();
        assert_eq!(dataset.step_days().unwrap(), 1);
    }

    #[test]
    fn step_days_requires_two_observations() {
        let records = daily_records("2024-01-01", &[1.0]);
        let dataset = TimeSeriesDataset::from_records(records, None).unwrap();
        assert!(matches!(
            dataset.step_days(),
            Err(ForecastError::CadenceInference(_))
        ));
    }

    #[test]
    fn future_dates_continue_the_series() {
        let records = daily_records("2024-01-01", &[100.0, 110.0, 105.0]);
        let dataset = TimeSeriesDataset::from_records(records, None).unwrap();

        let future = dataset.future_dates(2).unwrap();
        assert_eq!(future, vec![d("2024-01-04"), d("2024-01-05")]);
    }

    #[test]
    fn future_dates_follow_weekly_cadence() {
        let records = vec![
            TimeSeriesRecord::new(d("2024-01-01"), 1.0),
            TimeSeriesRecord::new(d("2024-01-08"), 2.0),
            TimeSeriesRecord::new(d("2024-01-15"), 3.0),
        ];
        let dataset = TimeSeriesDataset::from_records(records, None).unwrap();

        let future = dataset.future_dates(2).unwrap();
        assert_eq!(future, vec![d("2024-01-22"), d("2024-01-29")]);
    }

    #[test]
    fn records_round_trip_through_iter() {
        let records = daily_records("2024-03-01", &[5.0, 6.0]);
        let dataset = TimeSeriesDataset::from_records(records.clone(), None).unwrap();
        let back: Vec<_> = dataset.iter().collect();
        assert_eq!(back, records);
    }

    #[test]
    fn sales_record_revenue() {
        let record = SalesRecord {
            date: d("2024-01-01"),
            product_id: "SKU-1".to_string(),
            units_sold: 4.0,
            price: 2.5,
        };
        assert_eq!(record.revenue(), 10.0);
    }
}
