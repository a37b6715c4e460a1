// src/io/demand.rs

//! Synthetic demand histories for demos and tests.

use rand::thread_rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// A history where every period has the same quantity.
pub fn generate_constant_demand(periods: usize, value: f64) -> Vec<f64> {
    vec![value.max(0.0); periods]
}

/// A history drawn from a Normal (Bell Curve) distribution.
///
/// # Arguments
/// * `periods` - Length of the history.
/// * `mean` - The average quantity per period (e.g., 10.0).
/// * `std_dev` - The standard deviation (volatility) (e.g., 2.0).
///
/// Draws are rounded to two decimals and clamped at 0, since demand cannot
/// be negative. An invalid spread degrades to a constant history.
pub fn generate_normal_demand(periods: usize, mean: f64, std_dev: f64) -> Vec<f64> {
    if !(std_dev.is_finite() && std_dev >= 0.0) {
        return generate_constant_demand(periods, mean);
    }
    let normal = match Normal::new(mean, std_dev) {
        Ok(normal) => normal,
        Err(_) => return generate_constant_demand(periods, mean),
    };
    let mut rng = thread_rng();

    (0..periods)
        .map(|_| clamp_quantity(normal.sample(&mut rng)))
        .collect()
}

/// Shape of a seasonal history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalPattern {
    pub base: f64,
    /// Peak deviation from the base within one cycle.
    pub amplitude: f64,
    pub season_length: usize,
    /// Growth per period.
    pub trend: f64,
    /// Spread of the additive noise; 0 for a clean signal.
    pub noise_std_dev: f64,
}

/// A sinusoidal seasonal history with linear growth and optional noise.
pub fn generate_seasonal_demand(periods: usize, pattern: &SeasonalPattern) -> Vec<f64> {
    let season = pattern.season_length.max(1) as f64;
    let noise = Normal::new(0.0, pattern.noise_std_dev.max(0.0)).ok();
    let mut rng = thread_rng();

    (0..periods)
        .map(|t| {
            let phase = 2.0 * PI * t as f64 / season;
            let signal = pattern.base + pattern.amplitude * phase.sin() + pattern.trend * t as f64;
            let jitter = noise.as_ref().map_or(0.0, |n| n.sample(&mut rng));
            clamp_quantity(signal + jitter)
        })
        .collect()
}

fn clamp_quantity(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        (value * 100.0).round() / 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::stats::mean;

    #[test]
    fn constant() {
        assert_eq!(generate_constant_demand(3, 4.0), vec![4.0, 4.0, 4.0]);
        assert_eq!(generate_constant_demand(2, -1.0), vec![0.0, 0.0]);
    }

    #[test]
    fn normal_is_clamped_and_centred() {
        let history = generate_normal_demand(2_000, 50.0, 5.0);
        assert_eq!(history.len(), 2_000);
        assert!(history.iter().all(|v| *v >= 0.0));
        assert!((mean(&history) - 50.0).abs() < 1.0);
    }

    #[test]
    fn invalid_spread_degrades_to_constant() {
        assert_eq!(generate_normal_demand(2, 8.0, -1.0), vec![8.0, 8.0]);
        assert_eq!(generate_normal_demand(3, 8.0, f64::NAN), vec![8.0; 3]);
        assert_eq!(generate_normal_demand(2, 8.0, f64::INFINITY), vec![8.0, 8.0]);
    }

    #[test]
    fn clean_seasonal_signal_repeats() {
        let pattern = SeasonalPattern {
            base: 100.0,
            amplitude: 20.0,
            season_length: 12,
            trend: 0.0,
            noise_std_dev: 0.0,
        };
        let history = generate_seasonal_demand(36, &pattern);
        assert_eq!(history.len(), 36);
        assert!((history[3] - history[15]).abs() < 1e-9);
        assert!(history[3] > history[9]);
    }
}
