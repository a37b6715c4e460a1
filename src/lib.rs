//! Demand forecasting and inventory optimization engine.
//!
//! Every entry point is a pure function of its inputs: nothing is cached or
//! shared between calls, and every numeric output is finite apart from the
//! documented sentinels (infinite fit error, `-1` day counts).

pub mod error;
pub mod forecast;
pub mod inventory;
pub mod io;
pub mod logging;
pub mod model;
pub mod numeric;
pub mod simulation;

pub use error::{ConfigError, Result};
pub use forecast::holt_winters::{forecast, ForecastResult, HoltWinters, HoltWintersParameters};
pub use forecast::profile::DemandProfile;
pub use forecast::seasonality::{detect_seasonality, SeasonalityDetectionResult};
pub use inventory::safety_stock::{
    calculate_safety_stock, SafetyStockInput, SafetyStockMethod, SafetyStockResult,
};
pub use inventory::what_if::{
    analyze, sweep, SensitivityParameter, SensitivityResult, WhatIfInput, WhatIfResult,
};
pub use simulation::config::SimulationConfig;
pub use simulation::engine::{simulate_order, OrderSimulationInput, OrderSimulationResult};
