//! Held-out evaluation: accuracy plus per-class precision, recall and F1.

use serde::Serialize;

/// Scores for one class (ON or OFF).
///
/// A ratio whose denominator is zero is reported as `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of examples whose true label is this class.
    pub support: usize,
}

/// Evaluation of one classifier against labelled examples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub on: ClassMetrics,
    pub off: ClassMetrics,
}

#[derive(Debug, Default)]
struct Confusion {
    true_on: usize,
    false_on: usize,
    false_off: usize,
    true_off: usize,
}

impl ClassificationReport {
    /// Score `(expected, predicted)` pairs. `None` when there are none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (bool, bool)>) -> Option<Self> {
        let mut confusion = Confusion::default();
        for (expected, predicted) in pairs {
            match (expected, predicted) {
                (true, true) => confusion.true_on += 1,
                (false, true) => confusion.false_on += 1,
                (true, false) => confusion.false_off += 1,
                (false, false) => confusion.true_off += 1,
            }
        }

        let total =
            confusion.true_on + confusion.false_on + confusion.false_off + confusion.true_off;
        if total == 0 {
            return None;
        }

        Some(Self {
            accuracy: ratio(confusion.true_on + confusion.true_off, total),
            on: class(confusion.true_on, confusion.false_on, confusion.false_off),
            off: class(confusion.true_off, confusion.false_off, confusion.false_on),
        })
    }
}

fn class(hits: usize, false_alarms: usize, misses: usize) -> ClassMetrics {
    let precision = ratio(hits, hits + false_alarms);
    let recall = ratio(hits, hits + misses);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    ClassMetrics {
        precision,
        recall,
        f1,
        support: hits + misses,
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
