//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SmartEnergyError`] via `#[from]` (or an explicit `From` impl for
//! adapter-specific errors that land in [`SmartEnergyError::Persistence`]).
//!
//! [`InferenceError`] never reaches the top level: a failed prediction
//! falls back to the ground-truth rule. [`TrainingError`] only happens at
//! startup, before any cycle runs.

/// Top-level error for every smartenergy operation.
#[derive(Debug, thiserror::Error)]
pub enum SmartEnergyError {
    /// A value violated a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The feature source could not produce a reading.
    #[error("feature sampling failed")]
    Sampling(#[from] SamplingError),

    /// The durable decision log could not be written or removed.
    #[error("decision log persistence failed")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Temperature must be a finite number.
    #[error("temperature must be finite, got {0}")]
    NonFiniteTemperature(f64),

    /// Hour of day must be within `0..=23`.
    #[error("hour must be within 0..=23, got {0}")]
    HourOutOfRange(u8),

    /// Illuminance must be a finite number within `0..=100`.
    #[error("illuminance must be within 0..=100, got {0}")]
    IlluminanceOutOfRange(f64),

    /// Weather label is not one of the known categories.
    #[error("unknown weather category `{0}`")]
    UnknownWeather(String),

    /// Actuator name is not one of the known actuators.
    #[error("unknown actuator `{0}`")]
    UnknownActuator(String),

    /// Override label is not one of `auto`, `on`, `off`.
    #[error("unknown override mode `{0}`")]
    UnknownOverride(String),
}

/// Failure to acquire a feature record for a cycle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SamplingError {
    /// A sensor did not answer.
    #[error("sensor `{0}` unavailable")]
    SensorUnavailable(&'static str),

    /// The sensor answered with a reading that is not a valid feature.
    #[error("invalid sensor reading")]
    InvalidReading(#[from] ValidationError),
}

/// Failure to run a classifier on a feature record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    /// The feature record could not be encoded.
    #[error("feature record cannot be encoded")]
    InvalidFeature(#[from] ValidationError),
}

/// Failure to fit the classifiers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainingError {
    /// The training corpus had no examples.
    #[error("training corpus is empty")]
    EmptyCorpus,

    /// The held-out fraction must be within `0.0..1.0`.
    #[error("test fraction must be within 0.0..1.0, got {0}")]
    InvalidTestFraction(f64),

    /// Holding out the test split left nothing to fit on.
    #[error("training split is empty after holding out the test split")]
    EmptyTrainingSet,

    /// A training example carried an invalid feature record.
    #[error("training example is invalid")]
    InvalidExample(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_hour_out_of_range() {
        let err = ValidationError::HourOutOfRange(24);
        assert_eq!(err.to_string(), "hour must be within 0..=23, got 24");
    }

    #[test]
    fn should_display_sensor_unavailable() {
        let err = SamplingError::SensorUnavailable("dht22");
        assert_eq!(err.to_string(), "sensor `dht22` unavailable");
    }

    #[test]
    fn should_convert_sampling_error_into_top_level_error() {
        let err: SmartEnergyError = SamplingError::SensorUnavailable("pir").into();
        assert!(matches!(err, SmartEnergyError::Sampling(_)));
    }

    #[test]
    fn should_wrap_validation_error_in_inference_error() {
        let err: InferenceError = ValidationError::HourOutOfRange(30).into();
        assert_eq!(
            err,
            InferenceError::InvalidFeature(ValidationError::HourOutOfRange(30))
        );
    }

    #[test]
    fn should_expose_source_of_persistence_error() {
        let io = std::io::Error::other("disk full");
        let err = SmartEnergyError::Persistence(Box::new(io));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("disk full"));
    }
}
