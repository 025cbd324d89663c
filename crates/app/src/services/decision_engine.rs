//! Decision engine: sample, predict, resolve, price and log, once per cycle.

use std::sync::Arc;

use serde::Serialize;

use smartenergy_domain::actuator::{Actuator, ActuatorMap, ActuatorState};
use smartenergy_domain::control::{self, OverrideMode, Overrides};
use smartenergy_domain::decision::DecisionRecord;
use smartenergy_domain::energy::EnergyProfile;
use smartenergy_domain::error::SmartEnergyError;
use smartenergy_domain::feature::FeatureRecord;
use smartenergy_domain::time;

use crate::classifier::ClassifierSet;
use crate::ports::{DecisionLog, FeatureSource};

/// Outcome of a completed cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub record: DecisionRecord,
    /// Share of trees voting ON, per actuator; `None` where the rule decided.
    pub confidence: ActuatorMap<Option<f64>>,
    /// Actuators decided by the ground-truth rule because their classifier
    /// failed.
    pub fallbacks: Vec<Actuator>,
    /// `false` when the durable log could not be written. The record is
    /// still kept in memory.
    pub persisted: bool,
}

/// Runs decision cycles against a feature source and a decision log.
///
/// The models are shared and read-only; overrides and the last resolved
/// state belong to the engine.
pub struct DecisionEngine<S, L> {
    source: S,
    log: L,
    models: Arc<ClassifierSet>,
    profile: EnergyProfile,
    overrides: Overrides,
    state: ActuatorState,
}

impl<S: FeatureSource, L: DecisionLog> DecisionEngine<S, L> {
    /// Create an engine with every override on `auto` and every actuator off.
    pub fn new(source: S, log: L, models: Arc<ClassifierSet>, profile: EnergyProfile) -> Self {
        Self {
            source,
            log,
            models,
            profile,
            overrides: Overrides::default(),
            state: ActuatorState::default(),
        }
    }

    /// Start with the given overrides instead of all-`auto`.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Sample the feature source and run one cycle on the result.
    ///
    /// # Errors
    ///
    /// Returns [`SmartEnergyError::Sampling`] when the source fails. The
    /// cycle is skipped and [`current_state`](Self::current_state) keeps its
    /// previous value.
    pub fn run_cycle(&mut self) -> Result<CycleReport, SmartEnergyError> {
        let features = self.source.sample().inspect_err(|err| {
            tracing::warn!(error = %err, "feature sampling failed, keeping previous state");
        })?;
        Ok(self.run_cycle_with(features))
    }

    /// Run one cycle on caller-supplied features.
    ///
    /// Never fails. Features the classifiers cannot encode are decided by
    /// the ground-truth rule and listed in [`CycleReport::fallbacks`];
    /// persistence failures are reported through [`CycleReport::persisted`].
    pub fn run_cycle_with(&mut self, features: FeatureRecord) -> CycleReport {
        let inference = self.models.infer(&features);
        let state = control::resolve_all(&inference.predicted, &self.overrides);
        let power = self.profile.price(&state);

        let record = DecisionRecord::builder()
            .timestamp(time::now())
            .features(features)
            .predicted(inference.predicted)
            .overrides(self.overrides)
            .state(state)
            .power(power)
            .build();

        let persisted = match self.log.append(record.clone()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(id = %record.id(), error = %err, "decision not persisted");
                false
            }
        };
        self.state = state;

        tracing::debug!(
            id = %record.id(),
            climate = state.climate,
            entertainment = state.entertainment,
            lighting = state.lighting,
            watts = power.total_watts,
            cost = power.cost_per_hour,
            "cycle completed"
        );

        CycleReport {
            record,
            confidence: inference.confidence,
            fallbacks: inference.fallbacks,
            persisted,
        }
    }

    /// Set the operator override for one actuator. Takes effect next cycle.
    pub fn set_override(&mut self, actuator: Actuator, mode: OverrideMode) {
        tracing::info!(%actuator, %mode, "override changed");
        *self.overrides.get_mut(actuator) = mode;
    }

    #[must_use]
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// State resolved by the last successful cycle; all off before the first.
    #[must_use]
    pub fn current_state(&self) -> &ActuatorState {
        &self.state
    }

    /// Every logged record, oldest first.
    #[must_use]
    pub fn records(&self) -> &[DecisionRecord] {
        self.log.read_all()
    }

    /// Clear the decision log. Overrides and the current state are kept.
    ///
    /// # Errors
    ///
    /// Propagates [`SmartEnergyError::Persistence`] from the log.
    pub fn reset(&mut self) -> Result<(), SmartEnergyError> {
        self.log.reset()?;
        tracing::info!("decision log reset");
        Ok(())
    }

    /// Raw contents of the durable log, for download.
    ///
    /// # Errors
    ///
    /// Propagates [`SmartEnergyError::Persistence`] from the log.
    pub fn export(&self) -> Result<Option<Vec<u8>>, SmartEnergyError> {
        self.log.export()
    }
}
