// src/error.rs

use thiserror::Error;

/// Errors raised while building engine configuration.
///
/// The calculators themselves never fail; only a config that would make a
/// computation meaningless (zero trials, an empty search grid) is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("simulation needs at least one trial")]
    NoTrials,

    #[error("simulation horizon must be at least one day")]
    EmptyHorizon,

    #[error("parameter grid is empty")]
    EmptyGrid,

    #[error("grid value {value} for {name} is outside the open interval (0, 1)")]
    CoefficientOutOfRange { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
