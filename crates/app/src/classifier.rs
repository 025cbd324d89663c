//! Actuator classifiers: learned binary predictors, one per actuator.
//!
//! Each classifier is a bagged ensemble of CART trees fitted on the encoded
//! feature vector (see [`encoding`]). The three classifiers are fitted once
//! into a [`ClassifierSet`] and never change afterwards.

pub mod encoding;
pub mod forest;
pub mod metrics;
pub mod set;
pub mod tree;

pub use forest::{ForestParams, RandomForest};
pub use metrics::{ClassMetrics, ClassificationReport};
pub use set::{
    ActuatorClassifier, ClassifierSet, FeatureUsage, ForestSummary, Inference, LabelCounts,
    TrainingReport,
};
