// src/inventory/safety_stock.rs

use crate::inventory::z_score::{clamp_service_level, z_score_for};
use crate::numeric::safe::{coerce, finite_or, non_negative, safe_sqrt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyStockInput {
    pub average_daily_demand: f64,
    pub demand_std_dev: f64,
    pub lead_time_days: f64,
    /// Lead-time variability in days; absent or zero selects the simplified formula.
    pub lead_time_std_dev: Option<f64>,
    /// Target service level in [0.9, 0.999]; values outside are clamped.
    pub service_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStockMethod {
    /// Z * sigma_d * sqrt(L)
    Simplified,
    /// Z * sqrt(L * sigma_d^2 + d^2 * sigma_L^2)
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyStockResult {
    /// Whole units, rounded up.
    pub safety_stock: u64,
    pub z_score: f64,
    pub method: SafetyStockMethod,
}

/// Buffer stock needed to hit the target service level.
///
/// Items with no average demand get no safety stock regardless of spread.
pub fn calculate_safety_stock(input: &SafetyStockInput) -> SafetyStockResult {
    let demand = non_negative(input.average_daily_demand);
    let demand_sd = non_negative(input.demand_std_dev);
    let lead_time = non_negative(input.lead_time_days);
    let lead_time_sd = non_negative(coerce(input.lead_time_std_dev, 0.0));
    let z_score = z_score_for(clamp_service_level(input.service_level));

    let method = if lead_time_sd > 0.0 {
        SafetyStockMethod::Full
    } else {
        SafetyStockMethod::Simplified
    };

    if demand == 0.0 {
        return SafetyStockResult {
            safety_stock: 0,
            z_score,
            method,
        };
    }

    let raw = match method {
        SafetyStockMethod::Simplified => z_score * demand_sd * safe_sqrt(lead_time),
        SafetyStockMethod::Full => {
            let variance = lead_time * demand_sd.powi(2) + demand.powi(2) * lead_time_sd.powi(2);
            z_score * safe_sqrt(variance)
        }
    };

    SafetyStockResult {
        safety_stock: ceil_units(raw),
        z_score,
        method,
    }
}

/// Rounds up to whole units, never below zero.
pub(crate) fn ceil_units(value: f64) -> u64 {
    // Float noise such as 40.000000000000004 must not cost an extra unit.
    let value = (finite_or(value, 0.0) * 1e9).round() / 1e9;
    value.max(0.0).ceil() as u64
}
