use demand_planner::forecast::auto_forecast;
use demand_planner::io::demand::{generate_seasonal_demand, SeasonalPattern};
use demand_planner::logging;
use demand_planner::{
    analyze, calculate_safety_stock, simulate_order, sweep, DemandProfile, OrderSimulationInput,
    SafetyStockInput, SensitivityParameter, WhatIfInput,
};

fn main() {
    logging::init();
    println!("=== Demand Planning Walkthrough ===");

    // 1. GENERATE HISTORY
    // Three years of monthly sales with a summer peak and slow growth.
    let pattern = SeasonalPattern {
        base: 600.0,
        amplitude: 150.0,
        season_length: 12,
        trend: 4.0,
        noise_std_dev: 25.0,
    };
    let history = generate_seasonal_demand(36, &pattern);
    println!("History: {:?}", history);

    // 2. DETECT SEASONALITY AND FORECAST
    let (detection, forecast) = auto_forecast(&history, 6, 12);
    println!(
        "Seasonality: {} (period {:?}, acf {:.3} vs threshold {:.3})",
        detection.has_seasonality, detection.period, detection.autocorrelation, detection.threshold
    );
    let params = forecast.parameters;
    println!(
        "Holt-Winters alpha={:.1} beta={:.1} gamma={:.1}, MSE {:.2}",
        params.alpha, params.beta, params.gamma, forecast.fit_error
    );
    println!("Next 6 months: {:?}", forecast.forecast);

    // 3. SAFETY STOCK
    // Monthly buckets are roughly 30 days.
    let profile = DemandProfile::from_forecast(&forecast, 30.0);
    let safety = calculate_safety_stock(&SafetyStockInput {
        average_daily_demand: profile.average_daily_demand,
        demand_std_dev: profile.demand_std_dev,
        lead_time_days: 10.0,
        lead_time_std_dev: Some(2.0),
        service_level: 0.95,
    });
    println!(
        "Daily demand {:.2} +/- {:.2}; safety stock {} units (z={:.3}, {:?})",
        profile.average_daily_demand,
        profile.demand_std_dev,
        safety.safety_stock,
        safety.z_score,
        safety.method
    );

    // 4. SIMULATE A REPLENISHMENT ORDER
    let order = OrderSimulationInput {
        current_stock: 250.0,
        order_quantity: 600.0,
        average_daily_demand: 0.0,
        demand_std_dev: 0.0,
        lead_time_days: 10,
        unit_cost: 12.0,
        holding_cost_rate: 0.25,
        ordering_cost: 80.0,
    }
    .with_demand(profile);
    let outcome = simulate_order(&order);
    println!("\n=== Order Simulation ===");
    println!("Median stock by day: {:?}", outcome.projected_stock);
    println!("Stockout probability: {:.1}%", outcome.stockout_probability);
    println!(
        "Days until stockout: {}, days of supply after order: {}",
        outcome.days_until_stockout, outcome.days_of_supply_after_order
    );
    println!(
        "Holding cost change: ${:.2}, cash flow impact: ${:.2}",
        outcome.holding_cost_change, outcome.cash_flow_impact
    );

    // 5. WHAT-IF ANALYSIS
    let what_if = WhatIfInput {
        average_daily_demand: profile.average_daily_demand,
        demand_std_dev: profile.demand_std_dev,
        lead_time_days: 10.0,
        lead_time_std_dev: None,
        service_level: 0.95,
        unit_cost: 12.0,
        holding_cost_rate: 0.25,
        ordering_cost: 80.0,
    };
    let baseline = analyze(&what_if);
    println!("\n=== What-If ===");
    println!(
        "Reorder point {}, EOQ {}, {:.2} orders/year, total annual cost ${:.2}",
        baseline.reorder_point,
        baseline.economic_order_quantity,
        baseline.annual_order_frequency,
        baseline.total_annual_cost
    );
    for point in sweep(&what_if, SensitivityParameter::ServiceLevel, 0.90, 0.999) {
        println!(
            "{}: safety stock {}, reorder point {}, total cost ${:.2}",
            point.label,
            point.result.safety_stock,
            point.result.reorder_point,
            point.result.total_annual_cost
        );
    }

    println!("\nPlanning Complete.");
}
