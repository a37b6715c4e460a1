// src/forecast/profile.rs

use crate::forecast::holt_winters::ForecastResult;
use crate::numeric::safe::{ensure_positive, finite_or, round_to, safe_divide, safe_sqrt};
use crate::numeric::stats::mean;
use serde::{Deserialize, Serialize};

/// Daily demand parameters derived from a forecast, ready for the order
/// simulator or the safety-stock formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    pub average_daily_demand: f64,
    pub demand_std_dev: f64,
}

impl DemandProfile {
    /// Converts a per-period forecast into per-day terms.
    ///
    /// The fit error is a per-period variance, so the daily spread scales by
    /// 1 / sqrt(days_per_period). An infinite fit error (degenerate forecast)
    /// yields zero spread.
    pub fn from_forecast(result: &ForecastResult, days_per_period: f64) -> Self {
        let days = ensure_positive(days_per_period, 1.0);
        let per_period = mean(&result.forecast);
        let period_std_dev = safe_sqrt(finite_or(result.fit_error, 0.0));

        Self {
            average_daily_demand: round_to(safe_divide(per_period, days, 0.0), 2),
            demand_std_dev: round_to(safe_divide(period_std_dev, days.sqrt(), 0.0), 2),
        }
    }
}
