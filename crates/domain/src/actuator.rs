//! Actuators (the three controllable appliances) and a fixed per-actuator map.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A controllable appliance modelled as ON/OFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actuator {
    /// Air conditioner.
    Climate,
    /// Television.
    Entertainment,
    Lighting,
}

impl Actuator {
    /// Every actuator, in log column order.
    pub const ALL: [Self; 3] = [Self::Climate, Self::Entertainment, Self::Lighting];

    /// Column header used for this actuator in the durable log.
    #[must_use]
    pub const fn log_column(self) -> &'static str {
        match self {
            Self::Climate => "AC",
            Self::Entertainment => "TV",
            Self::Lighting => "Lampu",
        }
    }
}

impl fmt::Display for Actuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Climate => f.write_str("climate"),
            Self::Entertainment => f.write_str("entertainment"),
            Self::Lighting => f.write_str("lighting"),
        }
    }
}

impl FromStr for Actuator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "climate" | "ac" => Ok(Self::Climate),
            "entertainment" | "tv" => Ok(Self::Entertainment),
            "lighting" | "lampu" => Ok(Self::Lighting),
            _ => Err(ValidationError::UnknownActuator(s.to_string())),
        }
    }
}

/// One value per [`Actuator`].
///
/// Used for resolved states, predictions, overrides and rated wattages alike,
/// so no actuator can ever be missing from any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActuatorMap<T> {
    pub climate: T,
    pub entertainment: T,
    pub lighting: T,
}

/// Resolved ON/OFF state of every actuator.
pub type ActuatorState = ActuatorMap<bool>;

impl<T> ActuatorMap<T> {
    /// Build a map by evaluating `f` once per actuator.
    pub fn from_fn(mut f: impl FnMut(Actuator) -> T) -> Self {
        Self {
            climate: f(Actuator::Climate),
            entertainment: f(Actuator::Entertainment),
            lighting: f(Actuator::Lighting),
        }
    }

    /// Borrow the value for `actuator`.
    #[must_use]
    pub fn get(&self, actuator: Actuator) -> &T {
        match actuator {
            Actuator::Climate => &self.climate,
            Actuator::Entertainment => &self.entertainment,
            Actuator::Lighting => &self.lighting,
        }
    }

    /// Mutably borrow the value for `actuator`.
    pub fn get_mut(&mut self, actuator: Actuator) -> &mut T {
        match actuator {
            Actuator::Climate => &mut self.climate,
            Actuator::Entertainment => &mut self.entertainment,
            Actuator::Lighting => &mut self.lighting,
        }
    }

    /// Transform every value, keeping the actuator it belongs to.
    pub fn map<U>(&self, mut f: impl FnMut(Actuator, &T) -> U) -> ActuatorMap<U> {
        ActuatorMap::from_fn(|actuator| f(actuator, self.get(actuator)))
    }

    /// Iterate over `(actuator, value)` pairs in [`Actuator::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Actuator, &T)> {
        Actuator::ALL
            .into_iter()
            .map(move |actuator| (actuator, self.get(actuator)))
    }
}

impl ActuatorState {
    /// Actuators currently switched on.
    pub fn switched_on(&self) -> impl Iterator<Item = Actuator> + '_ {
        self.iter().filter(|(_, on)| **on).map(|(actuator, _)| actuator)
    }

    /// `true` when every actuator is off.
    #[must_use]
    pub fn all_off(&self) -> bool {
        self.switched_on().next().is_none()
    }
}

/// Render a boolean state as `ON` / `OFF`.
#[must_use]
pub fn on_off(state: bool) -> &'static str {
    if state { "ON" } else { "OFF" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_actuator_names_and_log_columns() {
        assert_eq!("climate".parse::<Actuator>().unwrap(), Actuator::Climate);
        assert_eq!("TV".parse::<Actuator>().unwrap(), Actuator::Entertainment);
        assert_eq!("Lampu".parse::<Actuator>().unwrap(), Actuator::Lighting);
    }

    #[test]
    fn should_reject_unknown_actuator() {
        assert!(matches!(
            "fridge".parse::<Actuator>(),
            Err(ValidationError::UnknownActuator(_))
        ));
    }

    #[test]
    fn should_build_map_from_fn() {
        let map = ActuatorMap::from_fn(|actuator| actuator.log_column());
        assert_eq!(map.climate, "AC");
        assert_eq!(map.entertainment, "TV");
        assert_eq!(map.lighting, "Lampu");
    }

    #[test]
    fn should_update_single_actuator_through_get_mut() {
        let mut state = ActuatorState::default();
        *state.get_mut(Actuator::Lighting) = true;
        assert!(!state.climate);
        assert!(!state.entertainment);
        assert!(state.lighting);
    }

    #[test]
    fn should_iterate_in_log_column_order() {
        let state = ActuatorState::default();
        let order: Vec<Actuator> = state.iter().map(|(actuator, _)| actuator).collect();
        assert_eq!(order, Actuator::ALL.to_vec());
    }

    #[test]
    fn should_list_switched_on_actuators() {
        let state = ActuatorState {
            climate: true,
            entertainment: false,
            lighting: true,
        };
        let on: Vec<Actuator> = state.switched_on().collect();
        assert_eq!(on, vec![Actuator::Climate, Actuator::Lighting]);
        assert!(!state.all_off());
        assert!(ActuatorState::default().all_off());
    }

    #[test]
    fn should_render_on_off() {
        assert_eq!(on_off(true), "ON");
        assert_eq!(on_off(false), "OFF");
    }

    #[test]
    fn should_serialize_map_with_actuator_keys() {
        let state = ActuatorState {
            climate: true,
            entertainment: false,
            lighting: false,
        };
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"climate": true, "entertainment": false, "lighting": false})
        );
    }
}
