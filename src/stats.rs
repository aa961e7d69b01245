//! Small statistical helpers shared by models and analytics.

/// Approximate quantile function for the standard normal distribution.
///
/// Uses the Abramowitz and Stegun approximation (formula 26.2.23).
///
/// # Example
/// ```
/// use oracle_forecast::stats::quantile_normal;
///
/// // 95% confidence level -> z ≈ 1.96
/// let z = quantile_normal(0.975);
/// assert!((z - 1.96).abs() < 0.01);
/// ```
pub fn quantile_normal(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let t = if p < 0.5 {
        (-2.0 * p.ln()).sqrt()
    } else {
        (-2.0 * (1.0 - p).ln()).sqrt()
    };

    // Abramowitz and Stegun coefficients
    let c0 = 2.515517;
    let c1 = 0.802853;
    let c2 = 0.010328;
    let d1 = 1.432788;
    let d2 = 0.189269;
    let d3 = 0.001308;

    let result = t - (c0 + c1 * t + c2 * t * t) / (1.0 + d1 * t + d2 * t * t + d3 * t * t * t);

    if p < 0.5 {
        -result
    } else {
        result
    }
}

/// Mean of a slice. NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of the last `n` elements (all of them when fewer exist).
pub fn tail_mean(values: &[f64], n: usize) -> f64 {
    let start = values.len().saturating_sub(n);
    mean(&values[start..])
}

/// Population variance of the finite entries of a slice.
pub fn variance_of_finite(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let m = mean(&finite);
    Some(finite.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / finite.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quantile_normal_matches_known_values() {
        assert_relative_eq!(quantile_normal(0.5), 0.0, epsilon = 1e-3);
        assert_relative_eq!(quantile_normal(0.975), 1.96, epsilon = 1e-2);
        assert_relative_eq!(quantile_normal(0.025), -1.96, epsilon = 1e-2);
        assert!(quantile_normal(0.0).is_infinite());
        assert!(quantile_normal(1.0).is_infinite());
    }

    #[test]
    fn mean_and_tail_mean() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(mean(&values), 2.5);
        assert_relative_eq!(tail_mean(&values, 2), 3.5);
        assert_relative_eq!(tail_mean(&values, 10), 2.5);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn variance_ignores_non_finite_entries() {
        let values = [f64::NAN, 1.0, 3.0];
        assert_relative_eq!(variance_of_finite(&values).unwrap(), 1.0);
        assert_eq!(variance_of_finite(&[f64::NAN]), None);
    }
}
