//! Bagged ensemble of decision trees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::encoding::{FEATURE_COUNT, FeatureVector};
use super::tree::{DecisionTree, TreeParams};

/// Hyper-parameters of a [`RandomForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    /// Number of trees.
    pub n_estimators: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Features considered per split; `None` means `floor(sqrt(FEATURE_COUNT))`.
    pub max_features: Option<usize>,
    /// Seed for bootstrap and feature sampling.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 10,
            min_samples_split: 2,
            max_features: None,
            seed: 42,
        }
    }
}

impl ForestParams {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn tree_params(&self) -> TreeParams {
        let default_features = (FEATURE_COUNT as f64).sqrt().floor() as usize;
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            max_features: self.max_features.unwrap_or(default_features).max(1),
        }
    }
}

/// Majority-vote ensemble of bootstrapped CART trees.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit `params.n_estimators` trees, each on its own bootstrap sample.
    ///
    /// Tree `i` draws from an RNG seeded with `seed + i`, so fitting the same
    /// data with the same parameters always yields the same forest.
    #[must_use]
    pub fn fit(samples: &[FeatureVector], labels: &[bool], params: &ForestParams) -> Self {
        let rows = samples.len().min(labels.len());
        if rows == 0 {
            return Self { trees: Vec::new() };
        }

        let tree_params = params.tree_params();
        let trees = (0..params.n_estimators)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(i as u64));
                let bootstrap: Vec<usize> = (0..rows).map(|_| rng.gen_range(0..rows)).collect();
                DecisionTree::fit(samples, labels, bootstrap, &tree_params, &mut rng)
            })
            .collect();

        Self { trees }
    }

    /// Fraction of trees voting ON.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn vote_share(&self, vector: &FeatureVector) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        self.votes(vector) as f64 / self.trees.len() as f64
    }

    /// Majority vote; a tie resolves to OFF.
    #[must_use]
    pub fn predict(&self, vector: &FeatureVector) -> bool {
        self.votes(vector) * 2 > self.trees.len()
    }

    /// Number of trees in the ensemble.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Depth of the deepest tree; `0` for an empty forest.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
    }

    /// Total number of splits made on each feature across all trees.
    #[must_use]
    pub fn split_counts(&self) -> [usize; FEATURE_COUNT] {
        let mut counts = [0; FEATURE_COUNT];
        for tree in &self.trees {
            tree.count_splits(&mut counts);
        }
        counts
    }

    fn votes(&self, vector: &FeatureVector) -> usize {
        self.trees.iter().filter(|tree| tree.predict(vector)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> (Vec<FeatureVector>, Vec<bool>) {
        let samples: Vec<FeatureVector> = (0..200)
            .map(|i| {
                let mut vector = [0.0; FEATURE_COUNT];
                vector[3] = f64::from(i % 20);
                vector[5] = f64::from(i % 2);
                vector
            })
            .collect();
        let labels = samples.iter().map(|s| s[3] >= 10.0 && s[5] > 0.5).collect();
        (samples, labels)
    }

    fn small() -> ForestParams {
        ForestParams {
            n_estimators: 15,
            ..ForestParams::default()
        }
    }

    #[test]
    fn should_default_to_hundred_trees_of_depth_ten() {
        let params = ForestParams::default();
        assert_eq!(params.n_estimators, 100);
        assert_eq!(params.max_depth, 10);
        assert_eq!(params.seed, 42);
        assert_eq!(params.tree_params().max_features, 2);
    }

    #[test]
    fn should_fit_requested_number_of_trees() {
        let (samples, labels) = dataset();
        let forest = RandomForest::fit(&samples, &labels, &small());
        assert_eq!(forest.len(), 15);
        assert!(!forest.is_empty());
        assert!(forest.max_depth() >= 2);
        assert!(forest.max_depth() <= small().max_depth);
    }

    #[test]
    fn should_learn_conjunction() {
        let (samples, labels) = dataset();
        let forest = RandomForest::fit(&samples, &labels, &small());
        let correct = samples
            .iter()
            .zip(&labels)
            .filter(|(sample, label)| forest.predict(sample) == **label)
            .count();
        assert!(correct >= 190, "only {correct} of 200 correct");
    }

    #[test]
    fn should_produce_identical_forests_for_same_seed() {
        let (samples, labels) = dataset();
        let a = RandomForest::fit(&samples, &labels, &small());
        let b = RandomForest::fit(&samples, &labels, &small());
        for sample in &samples {
            assert!((a.vote_share(sample) - b.vote_share(sample)).abs() < f64::EPSILON);
        }
        assert_eq!(a.split_counts(), b.split_counts());
    }

    #[test]
    fn should_predict_off_without_training_data() {
        let forest = RandomForest::fit(&[], &[], &small());
        assert!(forest.is_empty());
        assert_eq!(forest.max_depth(), 0);
        assert!(!forest.predict(&[0.0; FEATURE_COUNT]));
        assert!(forest.vote_share(&[0.0; FEATURE_COUNT]).abs() < f64::EPSILON);
    }
}
