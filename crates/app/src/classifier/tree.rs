//! CART decision tree with Gini impurity.

use rand::Rng;
use rand::seq::index;

use super::encoding::{FEATURE_COUNT, FeatureVector};

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    /// Maximum depth of any leaf (the root is depth 0).
    pub max_depth: usize,
    /// Nodes with fewer samples become leaves.
    pub min_samples_split: usize,
    /// Number of features drawn at random when searching each split.
    pub max_features: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        positive: bool,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A fitted binary decision tree.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Node,
}

struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// Fit a tree on the rows of `samples` selected by `indices`.
    ///
    /// `indices` may repeat rows (bootstrap samples do).
    pub fn fit<R: Rng>(
        samples: &[FeatureVector],
        labels: &[bool],
        indices: Vec<usize>,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let grower = Grower {
            samples,
            labels,
            params,
        };
        Self {
            root: grower.grow(indices, 0, rng),
        }
    }

    /// Predict the label of an encoded feature vector.
    #[must_use]
    pub fn predict(&self, vector: &FeatureVector) -> bool {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { positive } => return *positive,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if vector[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Depth of the deepest leaf.
    #[must_use]
    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        walk(&self.root)
    }

    /// Add the number of splits made on each feature to `counts`.
    pub fn count_splits(&self, counts: &mut [usize; FEATURE_COUNT]) {
        fn walk(node: &Node, counts: &mut [usize; FEATURE_COUNT]) {
            if let Node::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                counts[*feature] += 1;
                walk(left, counts);
                walk(right, counts);
            }
        }
        walk(&self.root, counts);
    }
}

struct Grower<'a> {
    samples: &'a [FeatureVector],
    labels: &'a [bool],
    params: &'a TreeParams,
}

impl Grower<'_> {
    fn grow<R: Rng>(&self, indices: Vec<usize>, depth: usize, rng: &mut R) -> Node {
        let total = indices.len();
        let positives = indices.iter().filter(|&&row| self.labels[row]).count();
        // Ties go to OFF.
        let majority = positives * 2 > total;

        if positives == 0
            || positives == total
            || depth >= self.params.max_depth
            || total < self.params.min_samples_split.max(2)
        {
            return Node::Leaf { positive: majority };
        }

        let Some(split) = self.best_split(&indices, positives, rng) else {
            return Node::Leaf { positive: majority };
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&row| self.samples[row][split.feature] <= split.threshold);

        Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(self.grow(left, depth + 1, rng)),
            right: Box::new(self.grow(right, depth + 1, rng)),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn best_split<R: Rng>(&self, indices: &[usize], positives: usize, rng: &mut R) -> Option<Split> {
        let total = indices.len();
        let parent = gini(positives, total);
        let amount = self.params.max_features.clamp(1, FEATURE_COUNT);

        let mut order = indices.to_vec();
        let mut best: Option<Split> = None;

        // Features past the first `amount` are only tried while no split has
        // lowered the impurity yet.
        for (drawn, feature) in index::sample(rng, FEATURE_COUNT, FEATURE_COUNT)
            .into_iter()
            .enumerate()
        {
            if drawn >= amount && best.is_some() {
                break;
            }
            order.sort_by(|&a, &b| self.samples[a][feature].total_cmp(&self.samples[b][feature]));

            let mut left_positives = 0;
            for k in 1..total {
                if self.labels[order[k - 1]] {
                    left_positives += 1;
                }
                let low = self.samples[order[k - 1]][feature];
                let high = self.samples[order[k]][feature];
                if high <= low {
                    continue;
                }

                let right_positives = positives - left_positives;
                let impurity = (k as f64 * gini(left_positives, k)
                    + (total - k) as f64 * gini(right_positives, total - k))
                    / total as f64;

                if impurity + 1e-12 < parent && best.as_ref().is_none_or(|b| impurity < b.impurity)
                {
                    let mid = low + (high - low) / 2.0;
                    best = Some(Split {
                        feature,
                        threshold: if mid < high { mid } else { low },
                        impurity,
                    });
                }
            }
        }

        best
    }
}

#[allow(clippy::cast_precision_loss)]
fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}
