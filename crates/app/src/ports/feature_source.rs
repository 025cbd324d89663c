//! Feature source port: where each cycle's feature record comes from.

use smartenergy_domain::error::SamplingError;
use smartenergy_domain::feature::FeatureRecord;

/// Produces one [`FeatureRecord`] per decision cycle, from real or simulated
/// sensors.
pub trait FeatureSource {
    /// Read the current features.
    ///
    /// # Errors
    ///
    /// Returns a [`SamplingError`] when a sensor is unavailable or answers
    /// with an invalid reading.
    fn sample(&mut self) -> Result<FeatureRecord, SamplingError>;
}

impl<F> FeatureSource for F
where
    F: FnMut() -> Result<FeatureRecord, SamplingError>,
{
    fn sample(&mut self) -> Result<FeatureRecord, SamplingError> {
        self()
    }
}
