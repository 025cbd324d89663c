//! Decision records: the immutable outcome of one decision cycle.

use serde::{Deserialize, Serialize};

use crate::actuator::ActuatorState;
use crate::control::Overrides;
use crate::energy::PowerReading;
use crate::feature::FeatureRecord;
use crate::id::DecisionId;
use crate::time::Timestamp;

/// Snapshot of one decision cycle.
///
/// Fields are private and only exposed through getters: once built, a record
/// cannot be altered by anyone holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    id: DecisionId,
    timestamp: Timestamp,
    features: FeatureRecord,
    predicted: ActuatorState,
    overrides: Overrides,
    state: ActuatorState,
    total_watts: f64,
    cost_per_hour: f64,
}

impl DecisionRecord {
    /// Create a builder for constructing a [`DecisionRecord`].
    #[must_use]
    pub fn builder() -> DecisionRecordBuilder {
        DecisionRecordBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> DecisionId {
        self.id
    }

    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Features the decision was taken on.
    #[must_use]
    pub fn features(&self) -> &FeatureRecord {
        &self.features
    }

    /// What the classifiers (or the fallback rule) proposed.
    #[must_use]
    pub fn predicted(&self) -> &ActuatorState {
        &self.predicted
    }

    /// Operator overrides in force during the cycle.
    #[must_use]
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Final, resolved actuator state.
    #[must_use]
    pub fn state(&self) -> &ActuatorState {
        &self.state
    }

    #[must_use]
    pub fn total_watts(&self) -> f64 {
        self.total_watts
    }

    #[must_use]
    pub fn cost_per_hour(&self) -> f64 {
        self.cost_per_hour
    }
}

/// Step-by-step builder for [`DecisionRecord`].
#[derive(Debug, Default)]
pub struct DecisionRecordBuilder {
    id: Option<DecisionId>,
    timestamp: Option<Timestamp>,
    features: Option<FeatureRecord>,
    predicted: Option<ActuatorState>,
    overrides: Overrides,
    state: ActuatorState,
    power: Option<PowerReading>,
}

impl DecisionRecordBuilder {
    #[must_use]
    pub fn id(mut self, id: DecisionId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn features(mut self, features: FeatureRecord) -> Self {
        self.features = Some(features);
        self
    }

    #[must_use]
    pub fn predicted(mut self, predicted: ActuatorState) -> Self {
        self.predicted = Some(predicted);
        self
    }

    #[must_use]
    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    #[must_use]
    pub fn state(mut self, state: ActuatorState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn power(mut self, power: PowerReading) -> Self {
        self.power = Some(power);
        self
    }

    /// Consume the builder and return a [`DecisionRecord`].
    ///
    /// Missing predictions default to the resolved state; missing power
    /// defaults to zero draw.
    #[must_use]
    pub fn build(self) -> DecisionRecord {
        let power = self.power.unwrap_or(PowerReading {
            total_watts: 0.0,
            cost_per_hour: 0.0,
        });
        DecisionRecord {
            id: self.id.unwrap_or_default(),
            timestamp: self.timestamp.unwrap_or_else(crate::time::now),
            features: self
                .features
                .unwrap_or_else(|| FeatureRecord::builder().into_record()),
            predicted: self.predicted.unwrap_or(self.state),
            overrides: self.overrides,
            state: self.state,
            total_watts: power.total_watts,
            cost_per_hour: power.cost_per_hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::OverrideMode;
    use crate::feature::Weather;

    fn features() -> FeatureRecord {
        FeatureRecord::builder()
            .temperature(29.5)
            .hour(19)
            .occupancy(true)
            .weather(Weather::Overcast)
            .illuminance(22.0)
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_record_with_all_fields() {
        let id = DecisionId::new();
        let ts = crate::time::now();
        let state = ActuatorState {
            climate: false,
            entertainment: true,
            lighting: true,
        };
        let overrides = Overrides {
            climate: OverrideMode::ForceOff,
            ..Overrides::default()
        };
        let record = DecisionRecord::builder()
            .id(id)
            .timestamp(ts)
            .features(features())
            .predicted(ActuatorState {
                climate: true,
                ..state
            })
            .overrides(overrides)
            .state(state)
            .power(PowerReading {
                total_watts: 600.0,
                cost_per_hour: 1140.0,
            })
            .build();

        assert_eq!(record.id(), id);
        assert_eq!(record.timestamp(), ts);
        assert_eq!(record.features(), &features());
        assert!(record.predicted().climate);
        assert_eq!(record.overrides().climate, OverrideMode::ForceOff);
        assert_eq!(record.state(), &state);
        assert!((record.total_watts() - 600.0).abs() < f64::EPSILON);
        assert!((record.cost_per_hour() - 1140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_default_predictions_to_resolved_state() {
        let state = ActuatorState {
            climate: true,
            entertainment: false,
            lighting: false,
        };
        let record = DecisionRecord::builder().state(state).build();
        assert_eq!(record.predicted(), &state);
        assert_eq!(record.overrides(), &Overrides::default());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let record = DecisionRecord::builder()
            .features(features())
            .power(PowerReading {
                total_watts: 250.0,
                cost_per_hour: 475.0,
            })
            .build();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: DecisionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
