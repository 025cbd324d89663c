//! Manual control: operator overrides and their resolution against predictions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::actuator::{ActuatorMap, ActuatorState};
use crate::error::ValidationError;

/// Operator-selected control mode for one actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OverrideMode {
    /// Follow the classifier.
    #[default]
    #[serde(rename = "auto")]
    Auto,
    /// Force the actuator on.
    #[serde(rename = "on")]
    ForceOn,
    /// Force the actuator off.
    #[serde(rename = "off")]
    ForceOff,
}

/// Override mode for every actuator.
pub type Overrides = ActuatorMap<OverrideMode>;

impl OverrideMode {
    /// Resolve the final actuator state from a classifier prediction.
    #[must_use]
    pub fn resolve(self, prediction: bool) -> bool {
        match self {
            Self::Auto => prediction,
            Self::ForceOn => true,
            Self::ForceOff => false,
        }
    }
}

/// Resolve the final state of one actuator.
///
/// `ForceOn` wins, then `ForceOff`, otherwise the prediction stands.
#[must_use]
pub fn resolve(prediction: bool, mode: OverrideMode) -> bool {
    mode.resolve(prediction)
}

/// Resolve every actuator independently.
#[must_use]
pub fn resolve_all(predictions: &ActuatorState, overrides: &Overrides) -> ActuatorState {
    predictions.map(|actuator, prediction| resolve(*prediction, *overrides.get(actuator)))
}

impl fmt::Display for OverrideMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::ForceOn => f.write_str("on"),
            Self::ForceOff => f.write_str("off"),
        }
    }
}

impl FromStr for OverrideMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "on" | "force_on" => Ok(Self::ForceOn),
            "off" | "force_off" => Ok(Self::ForceOff),
            _ => Err(ValidationError::UnknownOverride(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn should_force_off_over_positive_prediction() {
        assert!(!resolve(true, OverrideMode::ForceOff));
    }

    #[test]
    fn should_keep_negative_prediction_in_auto() {
        assert!(!resolve(false, OverrideMode::Auto));
    }

    #[test]
    fn should_force_on_over_negative_prediction() {
        assert!(resolve(false, OverrideMode::ForceOn));
    }

    #[test]
    fn should_default_to_auto() {
        assert_eq!(OverrideMode::default(), OverrideMode::Auto);
        assert_eq!(Overrides::default().lighting, OverrideMode::Auto);
    }

    #[test]
    fn should_resolve_each_actuator_independently() {
        let predictions = ActuatorState {
            climate: true,
            entertainment: true,
            lighting: false,
        };
        let overrides = Overrides {
            climate: OverrideMode::ForceOff,
            entertainment: OverrideMode::Auto,
            lighting: OverrideMode::ForceOn,
        };
        let resolved = resolve_all(&predictions, &overrides);
        assert_eq!(
            resolved,
            ActuatorState {
                climate: false,
                entertainment: true,
                lighting: true,
            }
        );
    }

    #[test]
    fn should_parse_operator_labels() {
        assert_eq!("Auto".parse::<OverrideMode>().unwrap(), OverrideMode::Auto);
        assert_eq!("ON".parse::<OverrideMode>().unwrap(), OverrideMode::ForceOn);
        assert_eq!("off".parse::<OverrideMode>().unwrap(), OverrideMode::ForceOff);
        assert!("maybe".parse::<OverrideMode>().is_err());
    }

    #[test]
    fn should_serialize_as_short_labels() {
        let json = serde_json::to_string(&OverrideMode::ForceOn).unwrap();
        assert_eq!(json, "\"on\"");
        let parsed: OverrideMode = serde_json::from_str("\"off\"").unwrap();
        assert_eq!(parsed, OverrideMode::ForceOff);
    }

    proptest! {
        #[test]
        fn auto_always_follows_prediction(prediction in any::<bool>()) {
            prop_assert_eq!(resolve(prediction, OverrideMode::Auto), prediction);
        }

        #[test]
        fn forced_modes_ignore_prediction(prediction in any::<bool>()) {
            prop_assert!(resolve(prediction, OverrideMode::ForceOn));
            prop_assert!(!resolve(prediction, OverrideMode::ForceOff));
        }
    }
}
