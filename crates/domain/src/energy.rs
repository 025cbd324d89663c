//! Power and cost accounting.

use serde::{Deserialize, Serialize};

use crate::actuator::{ActuatorMap, ActuatorState};

/// Instantaneous power draw and the hourly cost it implies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerReading {
    /// Total draw in watts, baseline included.
    pub total_watts: f64,
    /// Cost of sustaining `total_watts` for one hour.
    pub cost_per_hour: f64,
}

/// Wattages and tariff used to price a set of actuator states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyProfile {
    /// Draw of each actuator while switched on, in watts.
    pub rated_watts: ActuatorMap<f64>,
    /// Always-on household load (standby, fridge, …), in watts.
    pub baseline_watts: f64,
    /// Price of one kWh.
    pub tariff_per_kwh: f64,
}

impl Default for EnergyProfile {
    fn default() -> Self {
        Self {
            rated_watts: ActuatorMap {
                climate: 1500.0,
                entertainment: 100.0,
                lighting: 250.0,
            },
            baseline_watts: 250.0,
            tariff_per_kwh: 1900.0,
        }
    }
}

impl EnergyProfile {
    /// Price the given actuator states with this profile.
    #[must_use]
    pub fn price(&self, states: &ActuatorState) -> PowerReading {
        compute(
            states,
            &self.rated_watts,
            self.baseline_watts,
            self.tariff_per_kwh,
        )
    }
}

/// Sum the baseline and the rated draw of every switched-on actuator, then
/// price one hour of it.
///
/// Values pass through unchanged: a zero or negative tariff is not clamped.
#[must_use]
pub fn compute(
    states: &ActuatorState,
    rated_watts: &ActuatorMap<f64>,
    baseline_watts: f64,
    tariff_per_kwh: f64,
) -> PowerReading {
    let total_watts = baseline_watts
        + states
            .switched_on()
            .map(|actuator| *rated_watts.get(actuator))
            .sum::<f64>();
    PowerReading {
        total_watts,
        cost_per_hour: (total_watts / 1000.0) * tariff_per_kwh,
    }
}
