//! Numeric encoding of feature records.
//!
//! Layout: one-hot weather `[clear, rain, overcast]`, then `temperature`,
//! `hour`, `occupancy`, `is_holiday`, `illuminance`.

use smartenergy_domain::error::InferenceError;
use smartenergy_domain::feature::{FeatureRecord, Weather};

/// Width of an encoded feature vector.
pub const FEATURE_COUNT: usize = Weather::ALL.len() + 5;

/// Encoded feature vector.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Column names, aligned with [`FeatureVector`] positions.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "weather=clear",
    "weather=rain",
    "weather=overcast",
    "temperature",
    "hour",
    "occupancy",
    "is_holiday",
    "illuminance",
];

/// Encode a feature record.
///
/// # Errors
///
/// Returns [`InferenceError::InvalidFeature`] when the record fails
/// validation (non-finite or out-of-range numbers).
pub fn encode(feature: &FeatureRecord) -> Result<FeatureVector, InferenceError> {
    feature.validate()?;

    let mut vector = [0.0; FEATURE_COUNT];
    vector[feature.weather.index()] = 1.0;
    let offset = Weather::ALL.len();
    vector[offset] = feature.temperature;
    vector[offset + 1] = f64::from(feature.hour);
    vector[offset + 2] = flag(feature.occupancy);
    vector[offset + 3] = flag(feature.is_holiday);
    vector[offset + 4] = feature.illuminance;
    Ok(vector)
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}
