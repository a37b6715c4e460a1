// src/inventory/optimization.rs

//! Closed-form replenishment formulas.
//!
//! These are the deterministic counterparts of the order simulator: where to
//! trigger a reorder and how much to order so that holding and ordering
//! costs balance.

use crate::inventory::safety_stock::ceil_units;
use crate::numeric::safe::{non_negative, safe_divide, safe_sqrt};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Calculates the Reorder Point.
///
/// # Formula
/// ROP = MeanDailyDemand * LeadTime + SafetyStock
///
/// Rounded up to whole units, like the safety stock feeding it.
pub fn reorder_point(average_daily_demand: f64, lead_time_days: f64, safety_stock: u64) -> u64 {
    let lead_time_demand = non_negative(average_daily_demand) * non_negative(lead_time_days);
    ceil_units(lead_time_demand + safety_stock as f64)
}

/// Calculates the Economic Order Quantity.
///
/// # Formula
/// EOQ = sqrt(2 * AnnualDemand * OrderingCost / HoldingCostPerUnit)
///
/// # Arguments
/// * `annual_demand` - Units consumed per year.
/// * `ordering_cost` - Fixed cost per order placed.
/// * `holding_cost_per_unit` - Cost of holding one unit for a year.
///
/// # Returns
/// Whole units, at least 1 when every term is positive, otherwise 0.
pub fn economic_order_quantity(
    annual_demand: f64,
    ordering_cost: f64,
    holding_cost_per_unit: f64,
) -> u64 {
    let annual_demand = non_negative(annual_demand);
    let ordering_cost = non_negative(ordering_cost);
    let holding_cost_per_unit = non_negative(holding_cost_per_unit);

    if annual_demand == 0.0 || ordering_cost == 0.0 || holding_cost_per_unit == 0.0 {
        return 0;
    }

    let eoq = safe_sqrt(safe_divide(
        2.0 * annual_demand * ordering_cost,
        holding_cost_per_unit,
        0.0,
    ));
    (eoq.round() as u64).max(1)
}

/// Orders placed per year at a given order quantity; 0 when nothing is ordered.
pub fn annual_order_frequency(annual_demand: f64, order_quantity: u64) -> f64 {
    safe_divide(non_negative(annual_demand), order_quantity as f64, 0.0)
}
