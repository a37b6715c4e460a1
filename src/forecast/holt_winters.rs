// src/forecast/holt_winters.rs

//! Additive Holt-Winters (triple exponential smoothing).
//!
//! ```text
//! Level:    L_t = α (y_t - S_{t-m}) + (1 - α)(L_{t-1} + T_{t-1})
//! Trend:    T_t = β (L_t - L_{t-1}) + (1 - β) T_{t-1}
//! Seasonal: S_t = γ (y_t - L_t) + (1 - γ) S_{t-m}
//! Forecast: F_{n+k} = L_n + k T_n + S_{n-m+((k-1) mod m)}
//! ```
//!
//! Parameters are chosen by exhaustive search over a coefficient grid,
//! minimizing mean squared error from the second season onward.

use crate::error::{self, ConfigError};
use crate::numeric::safe::{finite_or, round_to, safe_divide};
use crate::numeric::stats::mean;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Coefficients used when no grid combination yields a finite error.
pub const FALLBACK_COEFFICIENTS: (f64, f64, f64) = (0.3, 0.1, 0.1);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoltWintersParameters {
    /// Level smoothing, in (0, 1).
    pub alpha: f64,
    /// Trend smoothing, in (0, 1).
    pub beta: f64,
    /// Seasonal smoothing, in (0, 1).
    pub gamma: f64,
    /// Periods per cycle, e.g. 12 for monthly data with an annual cycle.
    pub season_length: usize,
}

impl HoltWintersParameters {
    pub fn new(alpha: f64, beta: f64, gamma: f64, season_length: usize) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            season_length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// One value per requested period, never negative.
    pub forecast: Vec<f64>,
    pub level: Vec<f64>,
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    /// MSE over the fitted region; infinite when the history is too short.
    pub fit_error: f64,
    pub parameters: HoltWintersParameters,
}

impl ForecastResult {
    fn degenerate(horizon: usize, season_length: usize) -> Self {
        Self {
            forecast: vec![0.0; horizon],
            level: Vec::new(),
            trend: Vec::new(),
            seasonal: Vec::new(),
            fit_error: f64::INFINITY,
            parameters: HoltWintersParameters::new(0.0, 0.0, 0.0, season_length),
        }
    }

    /// True when the history was too short to fit anything.
    pub fn is_degenerate(&self) -> bool {
        self.level.is_empty()
    }
}

/// Search space for the optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    grid: Vec<f64>,
    fallback: (f64, f64, f64),
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            grid: (1..=9).map(|i| i as f64 / 10.0).collect(),
            fallback: FALLBACK_COEFFICIENTS,
        }
    }
}

impl ForecastConfig {
    /// Uses `grid` for all three coefficients.
    pub fn with_grid(grid: Vec<f64>) -> error::Result<Self> {
        if grid.is_empty() {
            return Err(ConfigError::EmptyGrid);
        }
        if let Some(&value) = grid.iter().find(|v| !(v.is_finite() && **v > 0.0 && **v < 1.0)) {
            return Err(ConfigError::CoefficientOutOfRange {
                name: "grid",
                value,
            });
        }
        Ok(Self {
            grid,
            fallback: FALLBACK_COEFFICIENTS,
        })
    }

    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Number of coefficient combinations the search evaluates.
    pub fn combinations(&self) -> usize {
        self.grid.len().pow(3)
    }
}

/// Smoothing state over the whole history, before rounding.
struct Smoothed {
    level: Vec<f64>,
    trend: Vec<f64>,
    seasonal: Vec<f64>,
    fitted: Vec<f64>,
}

/// A Holt-Winters model with fixed coefficients.
#[derive(Debug, Clone, Copy)]
pub struct HoltWinters {
    params: HoltWintersParameters,
}

impl HoltWinters {
    pub fn new(params: HoltWintersParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> HoltWintersParameters {
        self.params
    }

    /// Fits the history and projects `horizon` periods ahead.
    pub fn fit(&self, series: &[f64], horizon: usize) -> ForecastResult {
        let m = self.params.season_length;
        if !has_two_seasons(series.len(), m) {
            return ForecastResult::degenerate(horizon, m);
        }

        let data = sanitize(series);
        let smoothed = self.smooth(&data);
        let fit_error = mean_squared_error(&data, &smoothed.fitted, m);

        let last = data.len() - 1;
        let forecast = (1..=horizon)
            .map(|k| {
                let seasonal = smoothed.seasonal[last + 1 - m + (k - 1) % m];
                let raw = smoothed.level[last] + k as f64 * smoothed.trend[last] + seasonal;
                round_to(finite_or(raw, 0.0).max(0.0), 2)
            })
            .collect();

        ForecastResult {
            forecast,
            level: round_all(&smoothed.level),
            trend: round_all(&smoothed.trend),
            seasonal: round_all(&smoothed.seasonal),
            fit_error,
            parameters: self.params,
        }
    }

    fn smooth(&self, data: &[f64]) -> Smoothed {
        let HoltWintersParameters {
            alpha,
            beta,
            gamma,
            season_length: m,
        } = self.params;
        let n = data.len();
        let (level0, trend0, initial_seasonal) = initial_components(data, m);

        let mut level = vec![0.0; n];
        let mut trend = vec![0.0; n];
        let mut seasonal = vec![0.0; n];
        let mut fitted = vec![0.0; n];

        level[0] = level0;
        trend[0] = trend0;
        seasonal[..m].copy_from_slice(&initial_seasonal);
        fitted[0] = level0 + initial_seasonal[0];

        for t in 1..n {
            let prior_seasonal = if t >= m {
                seasonal[t - m]
            } else {
                initial_seasonal[t]
            };
            let base = level[t - 1] + trend[t - 1];

            fitted[t] = base + prior_seasonal;
            level[t] = alpha * (data[t] - prior_seasonal) + (1.0 - alpha) * base;
            trend[t] = beta * (level[t] - level[t - 1]) + (1.0 - beta) * trend[t - 1];
            seasonal[t] = gamma * (data[t] - level[t]) + (1.0 - gamma) * prior_seasonal;
        }

        Smoothed {
            level,
            trend,
            seasonal,
            fitted,
        }
    }
}

/// Mean squared error of a fixed-coefficient fit; infinite when the history
/// holds fewer than two full seasons.
pub fn fit_error(series: &[f64], params: HoltWintersParameters) -> f64 {
    let m = params.season_length;
    if !has_two_seasons(series.len(), m) {
        return f64::INFINITY;
    }
    let data = sanitize(series);
    let smoothed = HoltWinters::new(params).smooth(&data);
    mean_squared_error(&data, &smoothed.fitted, m)
}

/// Forecasts with coefficients chosen from the default 9x9x9 grid.
pub fn forecast(series: &[f64], season_length: usize, horizon: usize) -> ForecastResult {
    forecast_with(&ForecastConfig::default(), series, season_length, horizon)
}

/// Forecasts with coefficients chosen from `config`'s grid.
#[instrument(skip(config, series), fields(n = series.len()))]
pub fn forecast_with(
    config: &ForecastConfig,
    series: &[f64],
    season_length: usize,
    horizon: usize,
) -> ForecastResult {
    if !has_two_seasons(series.len(), season_length) {
        debug!("history shorter than two seasons, returning zero forecast");
        return ForecastResult::degenerate(horizon, season_length);
    }

    let mut best: Option<(HoltWintersParameters, f64)> = None;
    for &alpha in &config.grid {
        for &beta in &config.grid {
            for &gamma in &config.grid {
                let params = HoltWintersParameters::new(alpha, beta, gamma, season_length);
                let error = fit_error(series, params);
                if !error.is_finite() {
                    continue;
                }
                if best.map_or(true, |(_, best_error)| error < best_error) {
                    best = Some((params, error));
                }
            }
        }
    }

    let params = match best {
        Some((params, error)) => {
            debug!(
                alpha = params.alpha,
                beta = params.beta,
                gamma = params.gamma,
                error,
                "grid search converged"
            );
            params
        }
        None => {
            let (alpha, beta, gamma) = config.fallback;
            warn!(
                combinations = config.combinations(),
                "no finite fit error on the grid, using fallback coefficients"
            );
            HoltWintersParameters::new(alpha, beta, gamma, season_length)
        }
    };

    HoltWinters::new(params).fit(series, horizon)
}

fn has_two_seasons(len: usize, season_length: usize) -> bool {
    season_length > 0 && len >= 2 * season_length
}

fn sanitize(series: &[f64]) -> Vec<f64> {
    series.iter().map(|&v| finite_or(v, 0.0)).collect()
}

fn round_all(values: &[f64]) -> Vec<f64> {
    values.iter().map(|&v| round_to(v, 2)).collect()
}

/// The first season only seeds the model, so it is left out of the error.
fn mean_squared_error(data: &[f64], fitted: &[f64], season_length: usize) -> f64 {
    let squared: f64 = data
        .iter()
        .zip(fitted)
        .skip(season_length)
        .map(|(actual, fit)| (actual - fit).powi(2))
        .sum();
    let count = data.len().saturating_sub(season_length);
    if count == 0 {
        return f64::INFINITY;
    }
    squared / count as f64
}

/// Initial level, trend and seasonal indices.
///
/// With two full seasons the trend is the averaged period-over-period change
/// between them; with less it falls back to the half-season difference within
/// the first season.
fn initial_components(data: &[f64], m: usize) -> (f64, f64, Vec<f64>) {
    let first = &data[..m];
    let level = mean(first);

    if data.len() >= 2 * m {
        let second = &data[m..2 * m];
        let trend = first
            .iter()
            .zip(second)
            .map(|(a, b)| safe_divide(b - a, m as f64, 0.0))
            .sum::<f64>()
            / m as f64;
        let second_mean = mean(second);
        let seasonal = first
            .iter()
            .zip(second)
            .map(|(a, b)| ((a - level) + (b - second_mean)) / 2.0)
            .collect();
        (level, trend, seasonal)
    } else {
        let half = m / 2;
        let trend = if half == 0 {
            0.0
        } else {
            safe_divide(mean(&first[half..]) - mean(&first[..half]), half as f64, 0.0)
        };
        let seasonal = first.iter().map(|v| v - level).collect();
        (level, trend, seasonal)
    }
}
