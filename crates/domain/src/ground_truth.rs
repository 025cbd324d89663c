//! Ground-truth rule: the deterministic thresholds used to label synthetic
//! training data.
//!
//! The learned classifiers approximate this rule; it is also the safety net
//! when a classifier cannot run on a feature record.

use crate::actuator::{Actuator, ActuatorState};
use crate::feature::{FeatureRecord, Weather};

/// Climate unit: occupied and hot, or occupied, warm and sunny.
#[must_use]
pub fn climate_label(feature: &FeatureRecord) -> bool {
    feature.occupancy
        && (feature.temperature > 30.0
            || (feature.temperature > 27.0 && feature.weather == Weather::Clear))
}

/// Entertainment unit: occupied in the evening, or on a holiday daytime.
#[must_use]
pub fn entertainment_label(feature: &FeatureRecord) -> bool {
    feature.occupancy
        && ((18..=22).contains(&feature.hour)
            || (feature.is_holiday && (9..=23).contains(&feature.hour)))
}

/// Lighting: occupied after dusk, before dawn, or in a dim room.
#[must_use]
pub fn lighting_label(feature: &FeatureRecord) -> bool {
    feature.occupancy && (feature.hour >= 18 || feature.hour < 6 || feature.illuminance < 30.0)
}

/// Label a single actuator.
#[must_use]
pub fn label_for(actuator: Actuator, feature: &FeatureRecord) -> bool {
    match actuator {
        Actuator::Climate => climate_label(feature),
        Actuator::Entertainment => entertainment_label(feature),
        Actuator::Lighting => lighting_label(feature),
    }
}

/// Label every actuator.
#[must_use]
pub fn label(feature: &FeatureRecord) -> ActuatorState {
    ActuatorState::from_fn(|actuator| label_for(actuator, feature))
}
