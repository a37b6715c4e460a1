// src/inventory/z_score.rs

//! Service level <-> Z-score conversion.
//!
//! One table of breakpoints serves both directions, so a Z-score derived from
//! a service level maps back to the same level (and vice versa) within the
//! table's range.

use crate::numeric::safe::{finite_or, safe_divide};

/// (service level, Z-score) breakpoints, strictly increasing in both columns.
const SERVICE_LEVEL_TABLE: [(f64, f64); 12] = [
    (0.90, 1.28),
    (0.91, 1.34),
    (0.92, 1.41),
    (0.93, 1.48),
    (0.94, 1.55),
    (0.95, 1.645),
    (0.96, 1.75),
    (0.97, 1.88),
    (0.98, 2.05),
    (0.99, 2.33),
    (0.995, 2.576),
    (0.999, 3.09),
];

pub const MIN_SERVICE_LEVEL: f64 = SERVICE_LEVEL_TABLE[0].0;
pub const MAX_SERVICE_LEVEL: f64 = SERVICE_LEVEL_TABLE[SERVICE_LEVEL_TABLE.len() - 1].0;

/// Clamps a service level into the supported range. NaN maps to the lower bound.
pub fn clamp_service_level(service_level: f64) -> f64 {
    finite_or(service_level, MIN_SERVICE_LEVEL).clamp(MIN_SERVICE_LEVEL, MAX_SERVICE_LEVEL)
}

/// Z-score for a target service level, clamping outside the table and
/// interpolating linearly between breakpoints.
pub fn z_score_for(service_level: f64) -> f64 {
    interpolate(finite_or(service_level, MIN_SERVICE_LEVEL), |row| row.0, |row| row.1)
}

/// Service level implied by a Z-score; the inverse of [`z_score_for`].
pub fn service_level_for(z_score: f64) -> f64 {
    interpolate(finite_or(z_score, 0.0), |row| row.1, |row| row.0)
}

fn interpolate(
    x: f64,
    key: impl Fn(&(f64, f64)) -> f64,
    value: impl Fn(&(f64, f64)) -> f64,
) -> f64 {
    let first = &SERVICE_LEVEL_TABLE[0];
    let last = &SERVICE_LEVEL_TABLE[SERVICE_LEVEL_TABLE.len() - 1];
    if x <= key(first) {
        return value(first);
    }
    if x >= key(last) {
        return value(last);
    }

    for pair in SERVICE_LEVEL_TABLE.windows(2) {
        let (lo, hi) = (&pair[0], &pair[1]);
        if x == key(hi) {
            return value(hi);
        }
        if x < key(hi) {
            let fraction = safe_divide(x - key(lo), key(hi) - key(lo), 0.0);
            return value(lo) + fraction * (value(hi) - value(lo));
        }
    }
    value(last)
}
