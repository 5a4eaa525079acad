//! Descriptive statistics over a rate series.
//!
//! `mean_abs_relative_step` is the average of `|r[i] - r[i-1]| / r[i-1]`
//! expressed as a percentage. It is a rough volatility proxy, not a
//! standard deviation of returns.

use serde::{Deserialize, Serialize};

use crate::error::InsufficientData;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub endpoint_delta: f64,
    /// `None` when the first value is zero.
    pub endpoint_delta_percent: Option<f64>,
    pub mean_abs_relative_step: f64,
}

pub fn compute_stats(rates: &[f64]) -> Result<Statistics, InsufficientData> {
    let (first, last) = match rates {
        [first, .., last] => (*first, *last),
        _ => return Err(InsufficientData { len: rates.len() }),
    };

    let min = rates.iter().copied().fold(f64::INFINITY, f64::min);
    let max = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = rates.iter().sum::<f64>() / rates.len() as f64;

    let endpoint_delta = last - first;
    let endpoint_delta_percent = (first != 0.0).then(|| endpoint_delta / first * 100.0);

    let steps: Vec<f64> = rates
        .windows(2)
        .filter(|pair| pair[0] != 0.0)
        .map(|pair| (pair[1] - pair[0]).abs() / pair[0])
        .collect();
    let mean_abs_relative_step = if steps.is_empty() {
        0.0
    } else {
        steps.iter().sum::<f64>() / steps.len() as f64 * 100.0
    };

    Ok(Statistics {
        count: rates.len(),
        min,
        max,
        mean,
        endpoint_delta,
        endpoint_delta_percent,
        mean_abs_relative_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn flat_series_has_no_movement() {
        let stats = compute_stats(&[1.0, 1.0, 1.0]).expect("enough data");
        assert_eq!((stats.min, stats.max, stats.mean), (1.0, 1.0, 1.0));
        assert_eq!(stats.endpoint_delta, 0.0);
        assert_eq!(stats.endpoint_delta_percent, Some(0.0));
        assert_eq!(stats.mean_abs_relative_step, 0.0);
    }

    #[test]
    fn short_series_is_insufficient() {
        assert_eq!(compute_stats(&[0.92]), Err(InsufficientData { len: 1 }));
        assert_eq!(compute_stats(&[]), Err(InsufficientData { len: 0 }));
    }

    #[test]
    fn step_average_is_a_percentage() {
        let stats = compute_stats(&[1.0, 1.1, 0.99]).expect("enough data");
        assert_relative_eq!(stats.mean_abs_relative_step, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_start_has_no_percent_change() {
        let stats = compute_stats(&[0.0, 1.0]).expect("enough data");
        assert_eq!(stats.endpoint_delta_percent, None);
        assert_eq!(stats.mean_abs_relative_step, 0.0);
    }
}
