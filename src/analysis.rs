//! Derived analytics: trend insights and historical summaries.

use crate::core::{ForecastResult, SalesRecord, TimeSeriesDataset};
use crate::stats::tail_mean;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Number of trailing periods compared when classifying a trend.
pub const INSIGHT_WINDOW: usize = 7;

/// Direction and strength of the predicted change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    StrongGrowth,
    ModestGrowth,
    Stable,
    ModestDecline,
    SharpDecline,
}

impl Trend {
    /// Classify a percent change into a trend band.
    pub fn from_change_percent(change: f64) -> Self {
        if change > 15.0 {
            Self::StrongGrowth
        } else if change > 5.0 {
            Self::ModestGrowth
        } else if change < -15.0 {
            Self::SharpDecline
        } else if change < -5.0 {
            Self::ModestDecline
        } else {
            Self::Stable
        }
    }
}

/// Plain-language reading of a product forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub product_id: String,
    /// Percent change of the trailing forecast average against the
    /// trailing historical average. Infinite when sales start from zero.
    pub change_percent: f64,
    pub trend: Trend,
    pub summary: String,
}

/// Compare the trailing historical average with the trailing forecast
/// average and render an actionable summary.
pub fn generate_insight(
    product_id: &str,
    history: &TimeSeriesDataset,
    forecast: &ForecastResult,
) -> Insight {
    let historical_avg = tail_mean(history.values(), INSIGHT_WINDOW);
    let forecast_avg = tail_mean(&forecast.predicted(), INSIGHT_WINDOW);

    let change_percent = if historical_avg.is_nan() || historical_avg == 0.0 {
        if forecast_avg > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    } else {
        ((forecast_avg - historical_avg) / historical_avg) * 100.0
    };

    let trend = Trend::from_change_percent(change_percent);
    let (trend_summary, recommendation) = match trend {
        Trend::StrongGrowth => (
            format!(
                "shows a strong upward trend. Sales are predicted to increase by approximately {:.0}% over the next month.",
                change_percent
            ),
            "Consider increasing stock to meet expected demand.",
        ),
        Trend::ModestGrowth => (
            format!(
                "shows a modest upward trend, with a predicted increase of around {:.0}%.",
                change_percent
            ),
            "Ensure stock levels are adequate.",
        ),
        Trend::SharpDecline => (
            format!(
                "shows a significant downward trend, with sales predicted to decrease by {:.0}%.",
                change_percent.abs()
            ),
            "Consider running promotions or reducing inventory.",
        ),
        Trend::ModestDecline => (
            format!(
                "shows a modest downward trend, with a predicted decrease of around {:.0}%.",
                change_percent.abs()
            ),
            "Monitor sales closely.",
        ),
        Trend::Stable => (
            "is predicted to remain stable.".to_string(),
            "Maintain current inventory and marketing strategies.",
        ),
    };

    Insight {
        product_id: product_id.to_string(),
        change_percent,
        trend,
        summary: format!("Product '{product_id}' {trend_summary} {recommendation}"),
    }
}

/// Revenue summed across all products for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// Total units sold for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTotal {
    pub product_id: String,
    pub units_sold: f64,
}

/// Historical summary of a whole upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalAnalysis {
    /// Per-date revenue, date-ascending.
    pub revenue_over_time: Vec<RevenuePoint>,
    /// Best sellers by total units, descending.
    pub top_products: Vec<ProductTotal>,
}

/// Number of best sellers reported by default.
pub const TOP_PRODUCT_COUNT: usize = 5;

impl HistoricalAnalysis {
    pub fn from_records(records: &[SalesRecord]) -> Self {
        Self {
            revenue_over_time: revenue_over_time(records),
            top_products: top_products(records, TOP_PRODUCT_COUNT),
        }
    }
}

/// Per-date total revenue (`units_sold * price`), date-ascending.
pub fn revenue_over_time(records: &[SalesRecord]) -> Vec<RevenuePoint> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *by_date.entry(record.date).or_insert(0.0) += record.revenue();
    }
    by_date
        .into_iter()
        .map(|(date, revenue)| RevenuePoint { date, revenue })
        .collect()
}

/// Top `n` products by total units sold, descending. Ties break on the
/// product id so the ordering is deterministic.
pub fn top_products(records: &[SalesRecord], n: usize) -> Vec<ProductTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in records {
        *totals.entry(record.product_id.as_str()).or_insert(0.0) += record.units_sold;
    }

    let mut ranked: Vec<ProductTotal> = totals
        .into_iter()
        .map(|(product_id, units_sold)| ProductTotal {
            product_id: product_id.to_string(),
            units_sold,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.units_sold
            .total_cmp(&a.units_sold)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Forecast, TimeSeriesRecord};
    use chrono::Duration;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn dataset(values: &[f64]) -> TimeSeriesDataset {
        let start = d("2024-01-01");
        let records = values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesRecord::new(start + Duration::days(i as i64), v))
            .collect();
        TimeSeriesDataset::from_records(records, None).unwrap()
    }

    fn dated_forecast(first: &str, values: &[f64]) -> ForecastResult {
        let start = d(first);
        let dates = (0..values.len())
            .map(|i| start + Duration::days(i as i64))
            .collect();
        ForecastResult::from_forecast(dates, &Forecast::from_values(values.to_vec())).unwrap()
    }

    #[test]
    fn trend_bands_match_thresholds() {
        assert_eq!(Trend::from_change_percent(20.0), Trend::StrongGrowth);
        assert_eq!(Trend::from_change_percent(10.0), Trend::ModestGrowth);
        assert_eq!(Trend::from_change_percent(0.0), Trend::Stable);
        assert_eq!(Trend::from_change_percent(-10.0), Trend::ModestDecline);
        assert_eq!(Trend::from_change_percent(-20.0), Trend::SharpDecline);
        // Boundary values stay in the milder band
        assert_eq!(Trend::from_change_percent(15.0), Trend::ModestGrowth);
        assert_eq!(Trend::from_change_percent(-5.0), Trend::Stable);
    }

    #[test]
    fn insight_reports_strong_growth() {
        let history = dataset(&[100.0; 14]);
        let forecast = dated_forecast("2024-01-15", &[130.0; 7]);

        let insight = generate_insight("SKU-1", &history, &forecast);
        assert_eq!(insight.trend, Trend::StrongGrowth);
        assert!((insight.change_percent - 30.0).abs() < 1e-9);
        assert!(insight.summary.starts_with("Product 'SKU-1' shows a strong upward trend"));
        assert!(insight.summary.contains("30%"));
        assert!(insight.summary.ends_with("Consider increasing stock to meet expected demand."));
    }

    #[test]
    fn insight_reports_stability() {
        let history = dataset(&[100.0; 14]);
        let forecast = dated_forecast("2024-01-15", &[102.0; 7]);

        let insight = generate_insight("SKU-1", &history, &forecast);
        assert_eq!(insight.trend, Trend::Stable);
        assert!(insight.summary.contains("is predicted to remain stable."));
    }

    #[test]
    fn insight_reports_sharp_decline_with_absolute_percent() {
        let history = dataset(&[100.0; 14]);
        let forecast = dated_forecast("2024-01-15", &[60.0; 7]);

        let insight = generate_insight("SKU-1", &history, &forecast);
        assert_eq!(insight.trend, Trend::SharpDecline);
        assert!(insight.summary.contains("decrease by 40%"));
    }

    #[test]
    fn insight_from_zero_history_is_infinite_growth() {
        let history = dataset(&[0.0; 10]);
        let forecast = dated_forecast("2024-01-11", &[10.0; 7]);

        let insight = generate_insight("SKU-1", &history, &forecast);
        assert!(insight.change_percent.is_infinite());
        assert_eq!(insight.trend, Trend::StrongGrowth);
    }

    #[test]
    fn insight_uses_only_the_trailing_window() {
        // Old history is huge, the last 7 observations average 100
        let mut values = vec![1000.0; 7];
        values.extend_from_slice(&[100.0; 7]);
        let history = dataset(&values);
        let forecast = dated_forecast("2024-01-15", &[100.0; 7]);

        let insight = generate_insight("SKU-1", &history, &forecast);
        assert_eq!(insight.trend, Trend::Stable);
    }

    fn sales(date: &str, product: &str, units: f64, price: f64) -> SalesRecord {
        SalesRecord {
            date: d(date),
            product_id: product.to_string(),
            units_sold: units,
            price,
        }
    }

    #[test]
    fn revenue_is_summed_per_date_in_order() {
        let records = vec![
            sales("2024-01-02", "SKU-1", 2.0, 10.0),
            sales("2024-01-01", "SKU-1", 1.0, 10.0),
            sales("2024-01-02", "SKU-2", 3.0, 5.0),
        ];
        let revenue = revenue_over_time(&records);

        assert_eq!(
            revenue,
            vec![
                RevenuePoint { date: d("2024-01-01"), revenue: 10.0 },
                RevenuePoint { date: d("2024-01-02"), revenue: 35.0 },
            ]
        );
    }

    #[test]
    fn top_products_ranks_by_units_sold() {
        let records = vec![
            sales("2024-01-01", "SKU-1", 5.0, 1.0),
            sales("2024-01-01", "SKU-2", 20.0, 1.0),
            sales("2024-01-02", "SKU-1", 10.0, 1.0),
            sales("2024-01-02", "SKU-3", 1.0, 1.0),
        ];
        let top = top_products(&records, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product_id, "SKU-2");
        assert_eq!(top[0].units_sold, 20.0);
        assert_eq!(top[1].product_id, "SKU-1");
        assert_eq!(top[1].units_sold, 15.0);
    }

    #[test]
    fn top_products_tie_breaks_on_product_id() {
        let records = vec![
            sales("2024-01-01", "SKU-B", 5.0, 1.0),
            sales("2024-01-01", "SKU-A", 5.0, 1.0),
        ];
        let top = top_products(&records, 5);
        assert_eq!(top[0].product_id, "SKU-A");
        assert_eq!(top[1].product_id, "SKU-B");
    }

    #[test]
    fn historical_analysis_bundles_both_views() {
        let records = vec![
            sales("2024-01-01", "SKU-1", 5.0, 2.0),
            sales("2024-01-02", "SKU-2", 1.0, 4.0),
        ];
        let analysis = HistoricalAnalysis::from_records(&records);

        assert_eq!(analysis.revenue_over_time.len(), 2);
        assert_eq!(analysis.top_products.len(), 2);
    }
}
