// src/inventory/what_if.rs

//! Deterministic what-if analysis.
//!
//! [`analyze`] chains the closed-form formulas for one parameter set;
//! [`sweep`] repeats it while varying a single parameter across a range.

use crate::inventory::optimization::{
    annual_order_frequency, economic_order_quantity, reorder_point, DAYS_PER_YEAR,
};
use crate::inventory::safety_stock::{calculate_safety_stock, ceil_units, SafetyStockInput};
use crate::inventory::z_score::{clamp_service_level, service_level_for, z_score_for};
use crate::numeric::safe::{finite_or, non_negative, round_to, safe_divide, safe_sqrt};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

pub const DEFAULT_SWEEP_STEPS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhatIfInput {
    pub average_daily_demand: f64,
    pub demand_std_dev: f64,
    pub lead_time_days: f64,
    pub lead_time_std_dev: Option<f64>,
    pub service_level: f64,
    pub unit_cost: f64,
    /// Annual holding cost as a fraction of unit cost, in (0, 1].
    pub holding_cost_rate: f64,
    /// Fixed cost per order placed.
    pub ordering_cost: f64,
}

impl WhatIfInput {
    fn safety_stock_input(&self) -> SafetyStockInput {
        SafetyStockInput {
            average_daily_demand: self.average_daily_demand,
            demand_std_dev: self.demand_std_dev,
            lead_time_days: self.lead_time_days,
            lead_time_std_dev: self.lead_time_std_dev,
            service_level: self.service_level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    pub service_level: f64,
    pub z_score: f64,
    pub safety_stock: u64,
    pub reorder_point: u64,
    pub economic_order_quantity: u64,
    pub annual_order_frequency: f64,
    pub average_inventory: f64,
    pub annual_holding_cost: f64,
    pub annual_ordering_cost: f64,
    pub total_annual_cost: f64,
    /// (1 - service level) * 100
    pub stockout_probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityParameter {
    ServiceLevel,
    LeadTime,
    SafetyStock,
}

impl fmt::Display for SensitivityParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityParameter::ServiceLevel => write!(f, "Service level"),
            SensitivityParameter::LeadTime => write!(f, "Lead time"),
            SensitivityParameter::SafetyStock => write!(f, "Safety stock"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub parameter: SensitivityParameter,
    /// Swept value after clamping/rounding, in the parameter's own unit.
    pub value: f64,
    pub label: String,
    #[serde(flatten)]
    pub result: WhatIfResult,
}

/// Resolution of a sensitivity sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// Intervals between min and max; a sweep yields `steps + 1` points.
    pub steps: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_SWEEP_STEPS,
        }
    }
}

/// Safety stock, reorder point, EOQ and annual costs for one parameter set.
pub fn analyze(input: &WhatIfInput) -> WhatIfResult {
    let safety = calculate_safety_stock(&input.safety_stock_input());
    let service_level = clamp_service_level(input.service_level);
    assemble(input, service_level, safety.z_score, safety.safety_stock)
}

/// Sweeps `parameter` over `[min, max]` in the default ten steps.
pub fn sweep(
    input: &WhatIfInput,
    parameter: SensitivityParameter,
    min: f64,
    max: f64,
) -> Vec<SensitivityResult> {
    sweep_with(&SweepConfig::default(), input, parameter, min, max)
}

/// Sweeps `parameter` linearly over `[min, max]`.
///
/// An inverted range yields no points. Service levels clamp to the
/// supported range; lead times round to whole days, at least one. Safety
/// stock is taken as given and the service level it implies is reported.
#[instrument(skip(config, input), fields(steps = config.steps))]
pub fn sweep_with(
    config: &SweepConfig,
    input: &WhatIfInput,
    parameter: SensitivityParameter,
    min: f64,
    max: f64,
) -> Vec<SensitivityResult> {
    let (min, max) = (finite_or(min, 0.0), finite_or(max, 0.0));
    if min > max {
        debug!(min, max, "inverted sweep range");
        return Vec::new();
    }

    let increment = safe_divide(max - min, config.steps as f64, 0.0);
    (0..=config.steps)
        .map(|i| {
            let raw = min + increment * i as f64;
            sensitivity_point(input, parameter, raw)
        })
        .collect()
}

fn sensitivity_point(
    input: &WhatIfInput,
    parameter: SensitivityParameter,
    raw: f64,
) -> SensitivityResult {
    let (value, label, result) = match parameter {
        SensitivityParameter::ServiceLevel => {
            let level = clamp_service_level(raw);
            let result = analyze(&WhatIfInput {
                service_level: level,
                ..*input
            });
            (level, format!("{parameter} {:.1}%", level * 100.0), result)
        }
        SensitivityParameter::LeadTime => {
            let days = raw.round().max(1.0);
            let result = analyze(&WhatIfInput {
                lead_time_days: days,
                ..*input
            });
            (days, format!("{parameter} {days} days"), result)
        }
        SensitivityParameter::SafetyStock => {
            let units = ceil_units(raw);
            let spread =
                non_negative(input.demand_std_dev) * safe_sqrt(non_negative(input.lead_time_days));
            let implied_z = safe_divide(units as f64, spread, 0.0);
            let level = service_level_for(implied_z);
            let result = assemble(input, level, z_score_for(level), units);
            (units as f64, format!("{parameter} {units} units"), result)
        }
    };

    SensitivityResult {
        parameter,
        value,
        label,
        result,
    }
}

fn assemble(
    input: &WhatIfInput,
    service_level: f64,
    z_score: f64,
    safety_stock: u64,
) -> WhatIfResult {
    let daily_demand = non_negative(input.average_daily_demand);
    let annual_demand = daily_demand * DAYS_PER_YEAR;
    let holding_cost_per_unit = non_negative(input.unit_cost) * non_negative(input.holding_cost_rate);
    let ordering_cost = non_negative(input.ordering_cost);

    let eoq = economic_order_quantity(annual_demand, ordering_cost, holding_cost_per_unit);
    let frequency = annual_order_frequency(annual_demand, eoq);
    let average_inventory = eoq as f64 / 2.0 + safety_stock as f64;
    let holding = average_inventory * holding_cost_per_unit;
    let ordering = frequency * ordering_cost;

    WhatIfResult {
        service_level,
        z_score,
        safety_stock,
        reorder_point: reorder_point(daily_demand, input.lead_time_days, safety_stock),
        economic_order_quantity: eoq,
        annual_order_frequency: round_to(frequency, 2),
        average_inventory: round_to(average_inventory, 2),
        annual_holding_cost: round_to(holding, 2),
        annual_ordering_cost: round_to(ordering, 2),
        total_annual_cost: round_to(holding + ordering, 2),
        stockout_probability: round_to((1.0 - service_level) * 100.0, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> WhatIfInput {
        WhatIfInput {
            average_daily_demand: 20.0,
            demand_std_dev: 5.0,
            lead_time_days: 9.0,
            lead_time_std_dev: None,
            service_level: 0.95,
            unit_cost: 10.0,
            holding_cost_rate: 0.25,
            ordering_cost: 50.0,
        }
    }

    #[test]
    fn core_chain() {
        let result = analyze(&base());
        assert_eq!(result.safety_stock, 25);
        assert_eq!(result.reorder_point, 205);
        // sqrt(2 * 7300 * 50 / 2.5) = 540.37
        assert_eq!(result.economic_order_quantity, 540);
        assert_eq!(result.annual_order_frequency, 13.52);
        assert_eq!(result.average_inventory, 295.0);
        assert_eq!(result.annual_holding_cost, 737.5);
        assert_eq!(result.stockout_probability, 5.0);
        assert_eq!(
            result.total_annual_cost,
            round_to(result.annual_holding_cost + 7300.0 / 540.0 * 50.0, 2)
        );
    }

    #[test]
    fn zero_cost_terms_force_zero_eoq() {
        for input in [
            WhatIfInput { ordering_cost: 0.0, ..base() },
            WhatIfInput { holding_cost_rate: 0.0, ..base() },
            WhatIfInput { unit_cost: 0.0, ..base() },
        ] {
            let result = analyze(&input);
            assert_eq!(result.economic_order_quantity, 0);
            assert_eq!(result.annual_order_frequency, 0.0);
            assert_eq!(result.annual_ordering_cost, 0.0);
        }
    }

    #[test]
    fn default_sweep_has_eleven_points() {
        let points = sweep(&base(), SensitivityParameter::ServiceLevel, 0.90, 0.99);
        assert_eq!(points.len(), 11);
        assert_eq!(points[0].label, "Service level 90.0%");
        assert!(points
            .windows(2)
            .all(|w| w[1].result.safety_stock >= w[0].result.safety_stock));
    }

    #[test]
    fn service_level_sweep_clamps() {
        let points = sweep(&base(), SensitivityParameter::ServiceLevel, 0.5, 1.0);
        assert_eq!(points.first().unwrap().value, 0.90);
        assert_eq!(points.last().unwrap().value, 0.999);
    }

    #[test]
    fn lead_time_sweep_rounds_and_floors() {
        let config = SweepConfig { steps: 4 };
        let points = sweep_with(&config, &base(), SensitivityParameter::LeadTime, 0.0, 2.0);
        let days: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(days, vec![1.0, 1.0, 1.0, 2.0, 2.0]);
        assert_eq!(points[4].label, "Lead time 2 days");
        assert_eq!(points[4].result.reorder_point, 40 + points[4].result.safety_stock);
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(sweep(&base(), SensitivityParameter::LeadTime, 10.0, 5.0).is_empty());
    }

    #[test]
    fn degenerate_safety_stock_sweep_matches_forward_reorder_point() {
        let forward = analyze(&base());
        let s = forward.safety_stock as f64;
        let config = SweepConfig { steps: 0 };
        let points = sweep_with(&config, &base(), SensitivityParameter::SafetyStock, s, s);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].result.safety_stock, forward.safety_stock);
        assert_eq!(points[0].result.reorder_point, forward.reorder_point);
        assert_eq!(points[0].label, "Safety stock 25 units");
    }

    #[test]
    fn implied_service_level_reproduces_safety_stock() {
        for level in [0.90, 0.93, 0.95, 0.975, 0.99] {
            let input = WhatIfInput { service_level: level, ..base() };
            let forward = analyze(&input);
            let s = forward.safety_stock as f64;
            let point = &sweep_with(
                &SweepConfig { steps: 0 },
                &input,
                SensitivityParameter::SafetyStock,
                s,
                s,
            )[0];
            let replay = analyze(&WhatIfInput {
                service_level: point.result.service_level,
                ..input
            });
            assert!(replay.safety_stock.abs_diff(forward.safety_stock) <= 1, "level {level}");
        }
    }

    #[test]
    fn zero_spread_implies_minimum_service_level() {
        let input = WhatIfInput { demand_std_dev: 0.0, ..base() };
        let points = sweep(&input, SensitivityParameter::SafetyStock, 0.0, 50.0);
        assert!(points.iter().all(|p| p.result.service_level == 0.90));
        assert_eq!(points[10].result.safety_stock, 50);
    }
}
