//! Application services: use-case implementations.
//!
//! Each service accepts port implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod decision_engine;
pub mod forecast;

pub use decision_engine::{CycleReport, DecisionEngine};
pub use forecast::{ForecastPoint, HourlyForecaster};
