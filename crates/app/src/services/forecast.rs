//! Typical-day power forecast.
//!
//! Each hour gets a synthetic feature record shaped like an ordinary working
//! day: the home is occupied early morning (05–07) and in the evening
//! (18–23), bright during daytime (06–17) and dim otherwise. Overrides are
//! ignored; the forecast shows what the classifiers alone would do.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use smartenergy_domain::actuator::ActuatorState;
use smartenergy_domain::energy::EnergyProfile;
use smartenergy_domain::feature::{FeatureRecord, Weather};

use crate::classifier::ClassifierSet;

/// Hours in a forecast day.
pub const HOURS_PER_DAY: u8 = 24;

/// Predicted draw for one hour of the typical day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub hour: u8,
    pub temperature: f64,
    pub state: ActuatorState,
    pub total_watts: f64,
    pub cost_per_hour: f64,
}

/// Builds hour-by-hour forecasts from the fitted classifiers.
pub struct HourlyForecaster {
    models: Arc<ClassifierSet>,
    profile: EnergyProfile,
    rng: StdRng,
}

impl HourlyForecaster {
    /// Create a forecaster with a fixed seed.
    #[must_use]
    pub fn seeded(models: Arc<ClassifierSet>, profile: EnergyProfile, seed: u64) -> Self {
        Self {
            models,
            profile,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a forecaster seeded from the operating system.
    #[must_use]
    pub fn from_entropy(models: Arc<ClassifierSet>, profile: EnergyProfile) -> Self {
        Self {
            models,
            profile,
            rng: StdRng::from_entropy(),
        }
    }

    /// Synthesize the typical-day feature record for `hour`.
    pub fn typical_features(&mut self, hour: u8) -> FeatureRecord {
        let occupancy = (5..=7).contains(&hour) || (18..=23).contains(&hour);
        let illuminance = if (6..=17).contains(&hour) {
            self.rng.gen_range(70.0..=100.0)
        } else {
            self.rng.gen_range(0.0..=30.0)
        };
        FeatureRecord {
            temperature: self.rng.gen_range(23.0..=33.0),
            hour,
            occupancy,
            weather: *Weather::ALL
                .choose(&mut self.rng)
                .unwrap_or(&Weather::Clear),
            is_holiday: false,
            illuminance,
        }
    }

    /// Forecast hours `0..hours`, capped at a full day.
    pub fn forecast(&mut self, hours: u8) -> Vec<ForecastPoint> {
        (0..hours.min(HOURS_PER_DAY))
            .map(|hour| {
                let features = self.typical_features(hour);
                let state = self.models.infer(&features).predicted;
                let power = self.profile.price(&state);
                ForecastPoint {
                    hour,
                    temperature: features.temperature,
                    state,
                    total_watts: power.total_watts,
                    cost_per_hour: power.cost_per_hour,
                }
            })
            .collect()
    }
}
