// src/forecast/seasonality.rs

//! Autocorrelation-based detection of a repeating cycle.

use crate::numeric::safe::{finite_or, safe_divide, safe_sqrt};
use crate::numeric::stats::mean;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shortest series the detector will look at.
pub const MIN_OBSERVATIONS: usize = 24;

/// Share of the series length that bounds the largest lag examined.
const MAX_LAG_FRACTION: f64 = 0.4;

/// Sums of squared deviations below this are treated as a constant series.
const ZERO_VARIANCE: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityDetectionResult {
    pub has_seasonality: bool,
    /// Winning lag, always >= 2 when present.
    pub period: Option<usize>,
    /// Autocorrelation at the winning lag, 0 when nothing qualified.
    pub autocorrelation: f64,
    /// Significance threshold the winner had to beat (2 / sqrt(n)).
    pub threshold: f64,
}

impl SeasonalityDetectionResult {
    fn none(threshold: f64) -> Self {
        Self {
            has_seasonality: false,
            period: None,
            autocorrelation: 0.0,
            threshold,
        }
    }
}

/// Detects the dominant seasonal period of `series`.
///
/// Lags 0 and 1 are never candidates: lag 1 reflects short-term momentum,
/// not a cycle. Scanning lags 2..=floor(0.4 n) in ascending order, the first
/// lag to reach the largest autocorrelation above the threshold wins, so ties
/// keep the smaller lag.
pub fn detect_seasonality(series: &[f64]) -> SeasonalityDetectionResult {
    let n = series.len();
    let threshold = safe_divide(2.0, safe_sqrt(n as f64), 0.0);

    if n < MIN_OBSERVATIONS {
        debug!(n, "series too short for seasonality detection");
        return SeasonalityDetectionResult::none(threshold);
    }

    let data: Vec<f64> = series.iter().map(|&v| finite_or(v, 0.0)).collect();
    let mu = mean(&data);
    let deviations: Vec<f64> = data.iter().map(|v| v - mu).collect();
    let total: f64 = deviations.iter().map(|d| d * d).sum();

    if total < ZERO_VARIANCE {
        debug!("constant series has no seasonality");
        return SeasonalityDetectionResult::none(threshold);
    }

    let max_lag = (n as f64 * MAX_LAG_FRACTION).floor() as usize;
    let mut best: Option<(usize, f64)> = None;

    for lag in 2..=max_lag {
        let acf = autocorrelation(&deviations, total, lag);
        if acf <= threshold {
            continue;
        }
        match best {
            Some((_, best_acf)) if acf <= best_acf => {}
            _ => best = Some((lag, acf)),
        }
    }

    match best {
        Some((period, acf)) => {
            debug!(period, acf, threshold, "seasonality detected");
            SeasonalityDetectionResult {
                has_seasonality: true,
                period: Some(period),
                autocorrelation: acf,
                threshold,
            }
        }
        None => SeasonalityDetectionResult::none(threshold),
    }
}

/// Sample autocorrelation at `lag` given mean-centred data and its total
/// sum of squares.
fn autocorrelation(deviations: &[f64], total: f64, lag: usize) -> f64 {
    let covariance: f64 = deviations
        .iter()
        .zip(deviations.iter().skip(lag))
        .map(|(a, b)| a * b)
        .sum();
    safe_divide(covariance, total, 0.0)
}
