//! Binary classification metrics on a held-out set.

use crate::dataset::Label;
use serde::Serialize;
use std::fmt;

/// Counts of predicted vs. actual classes, with phishing as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
}

impl ConfusionMatrix {
    pub fn from_pairs(actual: &[Label], predicted: &[Label]) -> Self {
        let mut cm = Self::default();
        for (a, p) in actual.iter().zip(predicted) {
            match (a, p) {
                (Label::Legitimate, Label::Legitimate) => cm.true_negatives += 1,
                (Label::Legitimate, Label::Phishing) => cm.false_positives += 1,
                (Label::Phishing, Label::Legitimate) => cm.false_negatives += 1,
                (Label::Phishing, Label::Phishing) => cm.true_positives += 1,
            }
        }
        cm
    }

    pub fn total(&self) -> usize {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    /// Rows are actual classes, columns predicted: `[[tn, fp], [fn, tp]]`.
    pub fn as_rows(&self) -> [[usize; 2]; 2] {
        [
            [self.true_negatives, self.false_positives],
            [self.false_negatives, self.true_positives],
        ]
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [[tn, fp], [fne, tp]] = self.as_rows();
        let width = [tn, fp, fne, tp]
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);
        writeln!(f, "[[{tn:>width$} {fp:>width$}]")?;
        write!(f, " [{fne:>width$} {tp:>width$}]]")
    }
}

/// Summary scores for a set of predictions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion: ConfusionMatrix,
}

impl ClassificationMetrics {
    /// Score `predicted` against `actual`. Ratios with a zero denominator are 0.
    pub fn compute(actual: &[Label], predicted: &[Label]) -> Self {
        let cm = ConfusionMatrix::from_pairs(actual, predicted);
        let tp = cm.true_positives as f64;

        let accuracy = ratio((cm.true_positives + cm.true_negatives) as f64, cm.total() as f64);
        let precision = ratio(tp, (cm.true_positives + cm.false_positives) as f64);
        let recall = ratio(tp, (cm.true_positives + cm.false_negatives) as f64);
        let f1 = ratio(2.0 * precision * recall, precision + recall);

        Self {
            accuracy,
            precision,
            recall,
            f1,
            confusion: cm,
        }
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}
