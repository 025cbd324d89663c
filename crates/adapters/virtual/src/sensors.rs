//! Simulated sensor bank implementing [`FeatureSource`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use smartenergy_app::ports::FeatureSource;
use smartenergy_domain::error::SamplingError;
use smartenergy_domain::feature::{FeatureRecord, Weather};
use smartenergy_domain::time;

/// Names of the simulated sensors, as reported in
/// [`SamplingError::SensorUnavailable`].
pub const SENSORS: [&str; 5] = ["dht22", "ldr", "pir", "weather", "calendar"];

/// Random sensor readings, one feature record per sample.
pub struct SimulatedSensors {
    rng: StdRng,
    fixed_hour: Option<u8>,
    failure_rate: f64,
}

impl SimulatedSensors {
    /// Create sensors with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create sensors seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            fixed_hour: None,
            failure_rate: 0.0,
        }
    }

    /// Report `hour` instead of reading the local clock.
    #[must_use]
    pub fn with_hour(mut self, hour: u8) -> Self {
        self.fixed_hour = Some(hour);
        self
    }

    /// Probability that a sample fails with an unavailable sensor.
    ///
    /// Clamped to `0.0..=1.0`; a non-finite rate disables failures.
    #[must_use]
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = if failure_rate.is_finite() {
            failure_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    fn read(&mut self) -> Result<FeatureRecord, SamplingError> {
        if self.failure_rate > 0.0 && self.rng.gen_bool(self.failure_rate) {
            let sensor = SENSORS.choose(&mut self.rng).copied().unwrap_or("dht22");
            return Err(SamplingError::SensorUnavailable(sensor));
        }

        let temperature = (self.rng.gen_range(24.0..=33.0_f64) * 10.0).round() / 10.0;
        let illuminance = f64::from(self.rng.gen_range(0..=100_u8));
        let weather = *Weather::ALL
            .choose(&mut self.rng)
            .unwrap_or(&Weather::Clear);

        let record = FeatureRecord::builder()
            .temperature(temperature)
            .illuminance(illuminance)
            .occupancy(self.rng.gen_bool(0.5))
            .weather(weather)
            .is_holiday(self.rng.gen_bool(0.5))
            .hour(self.fixed_hour.unwrap_or_else(time::current_hour))
            .build()?;
        Ok(record)
    }
}

impl FeatureSource for SimulatedSensors {
    fn sample(&mut self) -> Result<FeatureRecord, SamplingError> {
        let result = self.read();
        match &result {
            Ok(record) => tracing::debug!(
                temperature = record.temperature,
                illuminance = record.illuminance,
                occupancy = record.occupancy,
                weather = %record.weather,
                "sensors sampled"
            ),
            Err(err) => tracing::debug!(error = %err, "sensor sample failed"),
        }
        result
    }
}
