//! Training corpus generation.
//!
//! Feature distributions:
//!
//! | Feature | Distribution |
//! |---------|--------------|
//! | temperature | uniform `[20, 35]` °C |
//! | hour | uniform integer `0..=23` |
//! | occupancy | fair coin |
//! | weather | uniform over clear / rain / overcast |
//! | holiday | fair coin |
//! | illuminance | uniform `[0, 100]` |
//!
//! Labels come from the ground-truth rule, so only the inputs are random.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use smartenergy_domain::feature::{FeatureRecord, Weather};
use smartenergy_domain::training::TrainingExample;

/// Synthesizes labelled [`TrainingExample`]s.
pub struct CorpusGenerator {
    rng: StdRng,
}

impl CorpusGenerator {
    /// Create a generator with a fixed seed; the same seed always yields the
    /// same corpus.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw one feature record from the corpus distribution.
    pub fn sample_features(&mut self) -> FeatureRecord {
        FeatureRecord {
            temperature: self.rng.gen_range(20.0..=35.0),
            hour: self.rng.gen_range(0..=23),
            occupancy: self.rng.gen_bool(0.5),
            weather: *Weather::ALL
                .choose(&mut self.rng)
                .unwrap_or(&Weather::Clear),
            is_holiday: self.rng.gen_bool(0.5),
            illuminance: self.rng.gen_range(0.0..=100.0),
        }
    }

    /// Generate `n` labelled examples.
    pub fn generate(&mut self, n: usize) -> Vec<TrainingExample> {
        (0..n)
            .map(|_| TrainingExample::labelled(self.sample_features()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartenergy_domain::ground_truth;

    #[test]
    fn should_generate_requested_number_of_examples() {
        let corpus = CorpusGenerator::seeded(1).generate(250);
        assert_eq!(corpus.len(), 250);
    }

    #[test]
    fn should_generate_empty_corpus_for_zero() {
        assert!(CorpusGenerator::seeded(1).generate(0).is_empty());
    }

    #[test]
    fn should_draw_features_within_documented_ranges() {
        for example in CorpusGenerator::seeded(7).generate(2_000) {
            let f = example.features;
            assert!((20.0..=35.0).contains(&f.temperature));
            assert!(f.hour <= 23);
            assert!((0.0..=100.0).contains(&f.illuminance));
            assert!(f.validate().is_ok());
        }
    }

    #[test]
    fn should_label_every_example_with_ground_truth() {
        for example in CorpusGenerator::seeded(3).generate(500) {
            assert_eq!(example.labels, ground_truth::label(&example.features));
        }
    }

    #[test]
    fn should_reproduce_corpus_for_same_seed() {
        let a = CorpusGenerator::seeded(42).generate(100);
        let b = CorpusGenerator::seeded(42).generate(100);
        assert_eq!(a, b);
    }

    #[test]
    fn should_cover_every_weather_and_both_occupancy_values() {
        let corpus = CorpusGenerator::seeded(11).generate(1_000);
        for weather in Weather::ALL {
            assert!(corpus.iter().any(|e| e.features.weather == weather));
        }
        assert!(corpus.iter().any(|e| e.features.occupancy));
        assert!(corpus.iter().any(|e| !e.features.occupancy));
    }

    #[test]
    fn should_keep_empty_homes_fully_off() {
        let corpus = CorpusGenerator::seeded(5).generate(1_000);
        for example in corpus.iter().filter(|e| !e.features.occupancy) {
            assert!(example.labels.all_off());
        }
    }
}
