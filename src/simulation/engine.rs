// src/simulation/engine.rs

//! Monte Carlo projection of an order's effect on stock.
//!
//! Each trial walks the horizon day by day: the order lands once, on the day
//! equal to the lead time, and a normally distributed demand (clamped at zero)
//! is drawn every day. The reported trajectory is the per-day median across
//! trials, which keeps a few extreme runs from dragging the picture.

use crate::forecast::profile::DemandProfile;
use crate::model::ledger::StockLedger;
use crate::model::queues::TimeDelayQueue;
use crate::numeric::safe::{finite_or, non_negative, round_to, safe_divide};
use crate::numeric::stats::{mean, median, percentile};
use crate::simulation::config::SimulationConfig;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Day-count sentinel for "demand is zero, stock never runs out".
pub const NEVER: i64 = -1;

const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSimulationInput {
    pub current_stock: f64,
    pub order_quantity: f64,
    pub average_daily_demand: f64,
    pub demand_std_dev: f64,
    /// Day index on which the order arrives; 0 means it is not booked.
    pub lead_time_days: u32,
    pub unit_cost: f64,
    /// Annual holding cost as a fraction of unit cost, in (0, 1].
    pub holding_cost_rate: f64,
    pub ordering_cost: f64,
}

impl OrderSimulationInput {
    /// Replaces the demand parameters with those derived from a forecast.
    pub fn with_demand(self, profile: DemandProfile) -> Self {
        Self {
            average_daily_demand: profile.average_daily_demand,
            demand_std_dev: profile.demand_std_dev,
            ..self
        }
    }

    fn sanitized(&self) -> Self {
        Self {
            current_stock: finite_or(self.current_stock, 0.0),
            order_quantity: non_negative(self.order_quantity),
            average_daily_demand: non_negative(self.average_daily_demand),
            demand_std_dev: non_negative(self.demand_std_dev),
            lead_time_days: self.lead_time_days,
            unit_cost: non_negative(self.unit_cost),
            holding_cost_rate: non_negative(self.holding_cost_rate),
            ordering_cost: non_negative(self.ordering_cost),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSimulationResult {
    /// Per-day median stock; negative values are unmet demand.
    pub projected_stock: Vec<f64>,
    /// Per-day 10th percentile across trials.
    pub projected_stock_p10: Vec<f64>,
    /// Per-day 90th percentile across trials.
    pub projected_stock_p90: Vec<f64>,
    /// Percentage of trials that hit zero or below at least once, in [0, 100].
    pub stockout_probability: f64,
    /// Holding cost over the horizon with the order, minus without it.
    pub holding_cost_change: f64,
    /// Purchase amount + ordering cost + holding-cost change.
    pub cash_flow_impact: f64,
    /// Whole days current stock covers, or [`NEVER`].
    pub days_until_stockout: i64,
    /// Whole days current stock plus the order covers, or [`NEVER`].
    pub days_of_supply_after_order: i64,
}

/// Draws one day of demand.
enum DemandSampler {
    Fixed(f64),
    Normal(Normal<f64>),
}

impl DemandSampler {
    fn new(mean: f64, std_dev: f64) -> Self {
        if std_dev > 0.0 {
            if let Ok(normal) = Normal::new(mean, std_dev) {
                return DemandSampler::Normal(normal);
            }
        }
        DemandSampler::Fixed(mean)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            DemandSampler::Fixed(value) => *value,
            // Demand cannot be negative even though the distribution can be.
            DemandSampler::Normal(normal) => normal.sample(rng).max(0.0),
        }
    }
}

/// One trial's closing stock per day and whether it ever stocked out.
struct Trial {
    path: Vec<f64>,
    stocked_out: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderSimulator {
    config: SimulationConfig,
}

impl OrderSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    /// Runs the simulation with fresh thread-local randomness.
    pub fn run(&self, input: &OrderSimulationInput) -> OrderSimulationResult {
        self.run_with_rng(input, &mut rand::thread_rng())
    }

    /// Runs the simulation drawing from `rng`.
    #[instrument(skip(self, input, rng), fields(trials = self.config.trials))]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        input: &OrderSimulationInput,
        rng: &mut R,
    ) -> OrderSimulationResult {
        let input = input.sanitized();
        let horizon = self.config.horizon_days;
        let sampler = DemandSampler::new(input.average_daily_demand, input.demand_std_dev);

        let trials: Vec<Trial> = (0..self.config.trials)
            .map(|_| self.run_trial(&input, &sampler, &mut *rng))
            .collect();

        let mut projected_stock = Vec::with_capacity(horizon);
        let mut projected_stock_p10 = Vec::with_capacity(horizon);
        let mut projected_stock_p90 = Vec::with_capacity(horizon);
        for day in 0..horizon {
            let closing: Vec<f64> = trials.iter().map(|trial| trial.path[day]).collect();
            projected_stock.push(round_to(median(&closing), 2));
            projected_stock_p10.push(round_to(percentile(&closing, 10.0), 2));
            projected_stock_p90.push(round_to(percentile(&closing, 90.0), 2));
        }

        let stockouts = trials.iter().filter(|trial| trial.stocked_out).count();
        let stockout_probability = round_to(
            safe_divide(stockouts as f64, trials.len() as f64, 0.0) * 100.0,
            1,
        )
        .clamp(0.0, 100.0);

        let holding_cost_change = self.holding_cost_change(&input, &projected_stock);
        let ordering_cost = if input.order_quantity > 0.0 {
            input.ordering_cost
        } else {
            0.0
        };
        let cash_flow_impact = round_to(
            input.order_quantity * input.unit_cost + ordering_cost + holding_cost_change,
            2,
        );

        debug!(
            stockout_probability,
            holding_cost_change, cash_flow_impact, "order simulation finished"
        );

        OrderSimulationResult {
            projected_stock,
            projected_stock_p10,
            projected_stock_p90,
            stockout_probability,
            holding_cost_change,
            cash_flow_impact,
            days_until_stockout: days_of_cover(input.current_stock, input.average_daily_demand),
            days_of_supply_after_order: days_of_cover(
                input.current_stock + input.order_quantity,
                input.average_daily_demand,
            ),
        }
    }

    fn run_trial<R: Rng + ?Sized>(
        &self,
        input: &OrderSimulationInput,
        sampler: &DemandSampler,
        rng: &mut R,
    ) -> Trial {
        let horizon = self.config.horizon_days;
        let lead_time = input.lead_time_days as usize;

        // An order due at or past the horizon never lands.
        let mut pipeline = TimeDelayQueue::new(if lead_time < horizon { lead_time } else { 0 });
        if lead_time > 0 && lead_time < horizon {
            pipeline.push_departure(input.order_quantity);
        }

        let mut ledger = StockLedger::new(input.current_stock);
        let mut path = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            ledger.receive(pipeline.pop_arrival());
            path.push(ledger.consume(sampler.sample(&mut *rng)));
        }

        Trial {
            path,
            stocked_out: ledger.stocked_out,
        }
    }

    /// Holding cost of the simulated median path against a no-order baseline
    /// that depletes linearly, both floored at zero stock.
    fn holding_cost_change(&self, input: &OrderSimulationInput, projected: &[f64]) -> f64 {
        let horizon = self.config.horizon_days;
        let baseline: Vec<f64> = (1..=horizon)
            .map(|day| (input.current_stock - input.average_daily_demand * day as f64).max(0.0))
            .collect();
        let simulated: Vec<f64> = projected.iter().map(|stock| stock.max(0.0)).collect();

        let daily_rate = input.holding_cost_rate / DAYS_PER_YEAR;
        let delta = (mean(&simulated) - mean(&baseline)) * input.unit_cost * daily_rate;
        round_to(delta * horizon as f64, 2)
    }
}

/// Simulates `input` with the default 100 trials over 30 days.
pub fn simulate_order(input: &OrderSimulationInput) -> OrderSimulationResult {
    OrderSimulator::default().run(input)
}

/// Whole days of cover. Demand too small to ever exhaust the stock reads as
/// [`NEVER`], and very long runways saturate at `i64::MAX`.
fn days_of_cover(stock: f64, daily_demand: f64) -> i64 {
    if daily_demand <= 0.0 {
        return NEVER;
    }
    let days = safe_divide(stock.max(0.0), daily_demand, f64::INFINITY);
    if days.is_finite() {
        days.floor() as i64
    } else {
        NEVER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn deterministic() -> OrderSimulationInput {
        OrderSimulationInput {
            current_stock: 100.0,
            order_quantity: 0.0,
            average_daily_demand: 20.0,
            demand_std_dev: 0.0,
            lead_time_days: 7,
            unit_cost: 5.0,
            holding_cost_rate: 0.2,
            ordering_cost: 25.0,
        }
    }

    #[test]
    fn deterministic_depletion() {
        let result = simulate_order(&deterministic());
        assert_eq!(result.days_until_stockout, 5);
        assert_eq!(result.days_of_supply_after_order, 5);
        assert_eq!(result.projected_stock.len(), 30);
        assert_eq!(result.projected_stock[3], 20.0);
        assert_eq!(result.projected_stock[4], 0.0);
        assert_eq!(result.projected_stock[5], -20.0);
        assert_eq!(result.stockout_probability, 100.0);
        assert_eq!(result.holding_cost_change, 0.0);
        assert_eq!(result.cash_flow_impact, 0.0);
    }

    #[test]
    fn order_lands_on_lead_time_day() {
        let input = OrderSimulationInput {
            order_quantity: 500.0,
            ..deterministic()
        };
        let result = simulate_order(&input);
        // Day 6 closes at -40; day 7 receives 500 and closes at 440.
        assert_eq!(result.projected_stock[6], -40.0);
        assert_eq!(result.projected_stock[7], 440.0);
        assert_eq!(result.days_of_supply_after_order, 30);
        assert!(result.holding_cost_change > 0.0);
        assert!(result.cash_flow_impact > 2_525.0);
    }

    #[test]
    fn order_beyond_horizon_never_arrives() {
        let input = OrderSimulationInput {
            order_quantity: 500.0,
            lead_time_days: 45,
            ..deterministic()
        };
        let result = simulate_order(&input);
        assert_eq!(result.projected_stock[29], 100.0 - 20.0 * 30.0);
    }

    #[test]
    fn zero_lead_time_books_nothing() {
        let input = OrderSimulationInput {
            order_quantity: 500.0,
            lead_time_days: 0,
            ..deterministic()
        };
        let result = simulate_order(&input);
        assert_eq!(result.projected_stock[0], 80.0);
    }

    #[test]
    fn zero_demand_uses_never_sentinel() {
        let input = OrderSimulationInput {
            average_daily_demand: 0.0,
            demand_std_dev: 3.0,
            ..deterministic()
        };
        let result = simulate_order(&input);
        assert_eq!(result.days_until_stockout, NEVER);
        assert_eq!(result.days_of_supply_after_order, NEVER);
        assert!(result.projected_stock.iter().all(|s| *s <= 100.0));
    }

    #[test]
    fn vanishing_demand_never_runs_out() {
        let input = OrderSimulationInput {
            current_stock: 1e6,
            average_daily_demand: 1e-320,
            ..deterministic()
        };
        let result = simulate_order(&input);
        assert_eq!(result.days_until_stockout, NEVER);
        assert_eq!(result.days_of_supply_after_order, NEVER);
        assert_eq!(days_of_cover(1e300, 1e-10), i64::MAX);
        assert_eq!(days_of_cover(0.0, 1e-320), 0);
    }

    #[test]
    fn sampled_demand_is_never_negative() {
        let input = OrderSimulationInput {
            average_daily_demand: 1.0,
            demand_std_dev: 50.0,
            ..deterministic()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let result = OrderSimulator::default().run_with_rng(&input, &mut rng);
        // With no order booked, clamped draws can only lower the stock.
        assert!(result.projected_stock.windows(2).all(|w| w[1] <= w[0]));
        assert!(result.projected_stock_p90.windows(2).all(|w| w[1] <= w[0]));
        assert!(result.projected_stock.iter().all(|s| *s <= 100.0));
    }

    #[test]
    fn bands_bracket_the_median() {
        let input = OrderSimulationInput {
            demand_std_dev: 6.0,
            order_quantity: 300.0,
            ..deterministic()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let result = OrderSimulator::default().run_with_rng(&input, &mut rng);
        for day in 0..30 {
            assert!(result.projected_stock_p10[day] <= result.projected_stock[day]);
            assert!(result.projected_stock[day] <= result.projected_stock_p90[day]);
        }
    }

    #[test]
    fn custom_config_sets_trajectory_length() {
        let simulator = OrderSimulator::new(SimulationConfig::new(10, 14).unwrap());
        let result = simulator.run(&deterministic());
        assert_eq!(result.projected_stock.len(), 14);
        assert_eq!(simulator.config().trials, 10);
    }

    #[test]
    fn malformed_input_stays_finite() {
        let input = OrderSimulationInput {
            current_stock: f64::NAN,
            order_quantity: f64::INFINITY,
            average_daily_demand: -3.0,
            demand_std_dev: f64::NAN,
            lead_time_days: 2,
            unit_cost: f64::NAN,
            holding_cost_rate: 0.2,
            ordering_cost: -1.0,
        };
        let result = simulate_order(&input);
        assert!(result.projected_stock.iter().all(|s| s.is_finite()));
        assert!(result.holding_cost_change.is_finite());
        assert!(result.cash_flow_impact.is_finite());
        assert_eq!(result.days_until_stockout, NEVER);
    }

    #[test]
    fn profile_fills_demand_fields() {
        let profile = DemandProfile {
            average_daily_demand: 12.5,
            demand_std_dev: 2.0,
        };
        let input = deterministic().with_demand(profile);
        assert_eq!(input.average_daily_demand, 12.5);
        assert_eq!(input.demand_std_dev, 2.0);
        assert_eq!(input.current_stock, 100.0);
    }
}
