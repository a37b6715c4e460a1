// src/numeric/stats.rs

use crate::numeric::safe::safe_divide;

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    safe_divide(data.iter().sum::<f64>(), data.len() as f64, 0.0)
}

/// Population variance (denominator `n`); 0 for an empty slice.
pub fn variance(data: &[f64]) -> f64 {
    let mu = mean(data);
    let sum_sq: f64 = data.iter().map(|x| (x - mu).powi(2)).sum();
    safe_divide(sum_sq, data.len() as f64, 0.0)
}

/// Median, averaging the two middle values for even lengths.
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(data);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Nearest-rank percentile, `p` in [0, 100].
pub fn percentile(data: &[f64], p: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(data);
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() as f64 - 1.0);
    sorted[(rank.round() as usize).min(sorted.len() - 1)]
}

fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}
