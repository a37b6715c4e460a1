// src/numeric/safe.rs

//! Guarded arithmetic.
//!
//! Every division, square root and externally supplied number in the engine
//! goes through these helpers, so no calculator can produce NaN or Infinity
//! from malformed input.

/// Divides `numerator` by `denominator`, returning `fallback` when the
/// denominator is zero, either operand is non-finite, or the quotient
/// overflows.
pub fn safe_divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 || !numerator.is_finite() || !denominator.is_finite() {
        return fallback;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        quotient
    } else {
        fallback
    }
}

/// Square root that yields 0 for negative or non-finite input.
pub fn safe_sqrt(value: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        return 0.0;
    }
    value.sqrt()
}

/// Replaces NaN and +/-Infinity with `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Coerces an optional, possibly malformed number.
pub fn coerce(value: Option<f64>, fallback: f64) -> f64 {
    value.map_or(fallback, |v| finite_or(v, fallback))
}

/// Substitutes `fallback` when `value` is not strictly positive and finite.
pub fn ensure_positive(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Clamps to zero or above, treating non-finite input as zero.
pub fn non_negative(value: f64) -> f64 {
    finite_or(value, 0.0).max(0.0)
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    finite_or((value * factor).round() / factor, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_guards_zero_and_non_finite() {
        assert_eq!(safe_divide(10.0, 4.0, 0.0), 2.5);
        assert_eq!(safe_divide(10.0, 0.0, -1.0), -1.0);
        assert_eq!(safe_divide(f64::NAN, 2.0, 7.0), 7.0);
        assert_eq!(safe_divide(1.0, f64::INFINITY, 3.0), 3.0);
        assert_eq!(safe_divide(f64::MAX, 1e-300, 0.0), 0.0);
    }

    #[test]
    fn sqrt_of_bad_input_is_zero() {
        assert_eq!(safe_sqrt(16.0), 4.0);
        assert_eq!(safe_sqrt(-4.0), 0.0);
        assert_eq!(safe_sqrt(f64::NAN), 0.0);
        assert_eq!(safe_sqrt(f64::INFINITY), 0.0);
    }

    #[test]
    fn coercion_and_positive_guard() {
        assert_eq!(coerce(None, 5.0), 5.0);
        assert_eq!(coerce(Some(f64::NAN), 5.0), 5.0);
        assert_eq!(coerce(Some(2.0), 5.0), 2.0);
        assert_eq!(ensure_positive(0.0, 1.0), 1.0);
        assert_eq!(ensure_positive(-3.0, 1.0), 1.0);
        assert_eq!(ensure_positive(f64::NEG_INFINITY, 1.0), 1.0);
        assert_eq!(ensure_positive(0.5, 1.0), 0.5);
        assert_eq!(non_negative(-2.0), 0.0);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(1.005_1, 2), 1.01);
        assert_eq!(round_to(-2.345, 1), -2.3);
        assert_eq!(round_to(f64::NAN, 2), 0.0);
    }
}
