// src/model/ledger.rs

/// Running stock position of a single simulated item.
///
/// Unlike a warehouse count the position may go negative: the shortfall is
/// demand that could not be served.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLedger {
    pub stock: f64,
    /// Set once the position has been at or below zero after any day.
    pub stocked_out: bool,
}

impl StockLedger {
    pub fn new(initial_stock: f64) -> Self {
        Self {
            stock: initial_stock,
            stocked_out: false,
        }
    }

    /// Books goods arriving from the supplier.
    pub fn receive(&mut self, quantity: f64) {
        self.stock += quantity;
    }

    /// Books the day's demand and returns the closing position.
    pub fn consume(&mut self, demand: f64) -> f64 {
        self.stock -= demand;
        if self.stock <= 0.0 {
            self.stocked_out = true;
        }
        self.stock
    }
}
