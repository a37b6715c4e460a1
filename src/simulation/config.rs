// src/simulation/config.rs

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Independent Monte Carlo runs per simulation.
    pub trials: usize,
    /// Days projected per run; also the length of every trajectory.
    pub horizon_days: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            horizon_days: 30,
        }
    }
}

impl SimulationConfig {
    pub fn new(trials: usize, horizon_days: usize) -> Result<Self> {
        if trials == 0 {
            return Err(ConfigError::NoTrials);
        }
        if horizon_days == 0 {
            return Err(ConfigError::EmptyHorizon);
        }
        Ok(Self {
            trials,
            horizon_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.trials, 100);
        assert_eq!(config.horizon_days, 30);
    }

    #[test]
    fn rejects_empty_runs() {
        assert_eq!(SimulationConfig::new(0, 30), Err(ConfigError::NoTrials));
        assert_eq!(SimulationConfig::new(10, 0), Err(ConfigError::EmptyHorizon));
        assert!(SimulationConfig::new(1, 1).is_ok());
    }
}
