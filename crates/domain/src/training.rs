//! Training examples: synthetic, rule-labelled feature records.

use serde::{Deserialize, Serialize};

use crate::actuator::ActuatorState;
use crate::feature::FeatureRecord;
use crate::ground_truth;

/// A feature record paired with the ground-truth label of every actuator.
///
/// Examples are only ever synthesized; real sensor readings are never
/// used as training data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub features: FeatureRecord,
    pub labels: ActuatorState,
}

impl TrainingExample {
    /// Label `features` with the ground-truth rule.
    #[must_use]
    pub fn labelled(features: FeatureRecord) -> Self {
        Self {
            labels: ground_truth::label(&features),
            features,
        }
    }
}
