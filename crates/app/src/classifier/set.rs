//! Per-actuator classifiers and their training report.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;

use smartenergy_domain::actuator::{Actuator, ActuatorMap, ActuatorState};
use smartenergy_domain::error::{InferenceError, TrainingError};
use smartenergy_domain::feature::FeatureRecord;
use smartenergy_domain::ground_truth;
use smartenergy_domain::training::TrainingExample;

use super::encoding::{self, FEATURE_NAMES, FeatureVector};
use super::forest::{ForestParams, RandomForest};
use super::metrics::ClassificationReport;

/// Learned ON/OFF predictor for one actuator.
#[derive(Debug, Clone)]
pub struct ActuatorClassifier {
    actuator: Actuator,
    forest: RandomForest,
}

/// Number of splits the forest made on one encoded feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureUsage {
    pub feature: &'static str,
    pub splits: usize,
}

/// Shape of a fitted forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForestSummary {
    pub trees: usize,
    pub max_depth: usize,
    /// Split counts per feature, a rough importance measure.
    pub feature_usage: Vec<FeatureUsage>,
}

impl ActuatorClassifier {
    /// Fit a classifier for `actuator` on `examples`.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingError::EmptyCorpus`] when `examples` is empty, or
    /// [`TrainingError::InvalidExample`] when an example fails validation.
    pub fn fit(
        actuator: Actuator,
        examples: &[TrainingExample],
        params: &ForestParams,
    ) -> Result<Self, TrainingError> {
        if examples.is_empty() {
            return Err(TrainingError::EmptyCorpus);
        }
        let samples = encode_all(examples)?;
        let labels: Vec<bool> = examples.iter().map(|e| *e.labels.get(actuator)).collect();
        Ok(Self {
            actuator,
            forest: RandomForest::fit(&samples, &labels, params),
        })
    }

    /// Predict whether the actuator should be ON.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::InvalidFeature`] when `feature` cannot be
    /// encoded.
    pub fn predict(&self, feature: &FeatureRecord) -> Result<bool, InferenceError> {
        let vector = encoding::encode(feature)?;
        Ok(self.forest.predict(&vector))
    }

    /// Majority vote and the fraction of trees voting ON.
    fn vote(&self, feature: &FeatureRecord) -> Result<(bool, f64), InferenceError> {
        let vector = encoding::encode(feature)?;
        Ok((self.forest.predict(&vector), self.forest.vote_share(&vector)))
    }

    /// Score the classifier on labelled `examples`; `None` when there are none.
    ///
    /// Examples that cannot be encoded are left out.
    #[must_use]
    pub fn evaluate(&self, examples: &[TrainingExample]) -> Option<ClassificationReport> {
        ClassificationReport::from_pairs(examples.iter().filter_map(|example| {
            let expected = *example.labels.get(self.actuator);
            self.predict(&example.features)
                .ok()
                .map(|predicted| (expected, predicted))
        }))
    }

    #[must_use]
    pub fn summary(&self) -> ForestSummary {
        ForestSummary {
            trees: self.forest.len(),
            max_depth: self.forest.max_depth(),
            feature_usage: FEATURE_NAMES
                .into_iter()
                .zip(self.forest.split_counts())
                .map(|(feature, splits)| FeatureUsage { feature, splits })
                .collect(),
        }
    }
}

/// Prediction for every actuator, plus which ones fell back to the rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub predicted: ActuatorState,
    /// Share of trees voting ON; `None` for actuators that fell back.
    pub confidence: ActuatorMap<Option<f64>>,
    /// Actuators whose classifier failed and were labelled by the
    /// ground-truth rule instead.
    pub fallbacks: Vec<Actuator>,
}

/// Number of ON and OFF labels for an actuator in a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub on: usize,
    pub off: usize,
}

/// Outcome of [`ClassifierSet::train`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub corpus_size: usize,
    pub train_size: usize,
    pub test_size: usize,
    /// Held-out accuracy; `None` when the test split is empty.
    pub accuracy: ActuatorMap<Option<f64>>,
    /// Held-out precision, recall and F1 per class.
    pub metrics: ActuatorMap<Option<ClassificationReport>>,
    /// Label balance across the whole corpus.
    pub label_counts: ActuatorMap<LabelCounts>,
    pub forests: ActuatorMap<ForestSummary>,
}

/// The three fitted classifiers, one per actuator.
///
/// Fitted once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ClassifierSet {
    classifiers: ActuatorMap<ActuatorClassifier>,
}

impl ClassifierSet {
    /// Fit every classifier on the whole of `examples`.
    ///
    /// # Errors
    ///
    /// See [`ActuatorClassifier::fit`].
    pub fn fit(examples: &[TrainingExample], params: &ForestParams) -> Result<Self, TrainingError> {
        Ok(Self {
            classifiers: ActuatorMap {
                climate: ActuatorClassifier::fit(Actuator::Climate, examples, params)?,
                entertainment: ActuatorClassifier::fit(Actuator::Entertainment, examples, params)?,
                lighting: ActuatorClassifier::fit(Actuator::Lighting, examples, params)?,
            },
        })
    }

    /// Shuffle `corpus`, hold out `test_fraction` of it, fit on the rest and
    /// report held-out metrics.
    ///
    /// The shuffle is seeded with `params.seed`.
    ///
    /// # Errors
    ///
    /// - [`TrainingError::EmptyCorpus`] when `corpus` is empty.
    /// - [`TrainingError::InvalidTestFraction`] unless `0.0 <= test_fraction < 1.0`.
    /// - [`TrainingError::InvalidExample`] when any example fails validation.
    /// - [`TrainingError::EmptyTrainingSet`] when nothing is left to fit on.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn train(
        corpus: &[TrainingExample],
        params: &ForestParams,
        test_fraction: f64,
    ) -> Result<(Self, TrainingReport), TrainingError> {
        if corpus.is_empty() {
            return Err(TrainingError::EmptyCorpus);
        }
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(TrainingError::InvalidTestFraction(test_fraction));
        }
        if let Some(err) = corpus.iter().find_map(|e| e.features.validate().err()) {
            return Err(TrainingError::InvalidExample(err));
        }

        let mut shuffled = corpus.to_vec();
        shuffled.shuffle(&mut StdRng::seed_from_u64(params.seed));

        let test_size = ((corpus.len() as f64) * test_fraction).ceil() as usize;
        let (test, train) = shuffled.split_at(test_size.min(corpus.len()));
        if train.is_empty() {
            return Err(TrainingError::EmptyTrainingSet);
        }

        let set = Self::fit(train, params)?;
        let metrics = set.classifiers.map(|_, classifier| classifier.evaluate(test));
        let report = TrainingReport {
            corpus_size: corpus.len(),
            train_size: train.len(),
            test_size: test.len(),
            accuracy: metrics.map(|_, m| m.map(|m| m.accuracy)),
            metrics,
            label_counts: ActuatorMap::from_fn(|actuator| {
                let on = corpus.iter().filter(|e| *e.labels.get(actuator)).count();
                LabelCounts {
                    on,
                    off: corpus.len() - on,
                }
            }),
            forests: set.classifiers.map(|_, classifier| classifier.summary()),
        };

        tracing::info!(
            corpus = report.corpus_size,
            train = report.train_size,
            test = report.test_size,
            climate = ?report.accuracy.climate,
            entertainment = ?report.accuracy.entertainment,
            lighting = ?report.accuracy.lighting,
            "classifiers trained"
        );

        Ok((set, report))
    }

    /// Borrow the classifier for `actuator`.
    #[must_use]
    pub fn classifier(&self, actuator: Actuator) -> &ActuatorClassifier {
        self.classifiers.get(actuator)
    }

    /// Predict a single actuator.
    ///
    /// # Errors
    ///
    /// See [`ActuatorClassifier::predict`].
    pub fn predict(&self, actuator: Actuator, feature: &FeatureRecord) -> Result<bool, InferenceError> {
        self.classifiers.get(actuator).predict(feature)
    }

    /// Predict every actuator, substituting the ground-truth rule for any
    /// classifier that fails.
    pub fn infer(&self, feature: &FeatureRecord) -> Inference {
        let mut fallbacks = Vec::new();
        let mut confidence = ActuatorMap::from_fn(|_| None);
        let predicted =
            ActuatorMap::from_fn(|actuator| match self.classifiers.get(actuator).vote(feature) {
                Ok((on, share)) => {
                    *confidence.get_mut(actuator) = Some(share);
                    on
                }
                Err(err) => {
                    tracing::warn!(%actuator, error = %err, "classifier failed, using rule fallback");
                    fallbacks.push(actuator);
                    ground_truth::label_for(actuator, feature)
                }
            });
        Inference {
            predicted,
            confidence,
            fallbacks,
        }
    }
}

fn encode_all(examples: &[TrainingExample]) -> Result<Vec<FeatureVector>, TrainingError> {
    examples
        .iter()
        .map(|example| {
            encoding::encode(&example.features).map_err(|err| match err {
                InferenceError::InvalidFeature(inner) => TrainingError::InvalidExample(inner),
            })
        })
        .collect()
}
