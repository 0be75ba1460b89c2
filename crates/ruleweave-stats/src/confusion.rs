//! Binary 2×2 confusion counts.

/// Confusion-matrix counters for a binary {0, 1} label space.
///
/// Counters are reset once per completed tracking window during training;
/// evaluation passes use a fresh instance per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positive: u64,
    pub true_negative: u64,
    pub false_positive: u64,
    pub false_negative: u64,
}

impl ConfusionCounts {
    /// Records one classified instance.
    pub fn record(&mut self, predicted_positive: bool, truth_positive: bool) {
        match (predicted_positive, truth_positive) {
            (true, true) => self.true_positive += 1,
            (true, false) => self.false_positive += 1,
            (false, false) => self.true_negative += 1,
            (false, true) => self.false_negative += 1,
        }
    }

    /// Balanced accuracy: `(TP/(TP+FN) + TN/(TN+FP)) / 2`.
    ///
    /// Either ratio defaults to 0.0 when its denominator is zero; an empty
    /// matrix therefore yields 0.0 rather than an error.
    #[must_use]
    pub fn balanced_accuracy(&self) -> f64 {
        let sensitivity = guarded_ratio(self.true_positive, self.true_positive + self.false_negative);
        let specificity = guarded_ratio(self.true_negative, self.true_negative + self.false_positive);
        (sensitivity + specificity) / 2.0
    }

    pub fn reset(&mut self) {
        *self = ConfusionCounts::default();
    }
}

#[expect(clippy::cast_precision_loss)]
fn guarded_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_accuracy() {
        // TP=8, FN=2, TN=7, FP=3 -> (8/10 + 7/10) / 2 = 0.75
        let counts = ConfusionCounts {
            true_positive: 8,
            false_negative: 2,
            true_negative: 7,
            false_positive: 3,
        };
        assert!((counts.balanced_accuracy() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty_matrix_is_guarded() {
        let counts = ConfusionCounts::default();
        assert_eq!(counts.balanced_accuracy(), 0.0);
    }

    #[test]
    fn test_all_negative_window_guards_positive_ratio() {
        let mut counts = ConfusionCounts::default();
        for _ in 0..10 {
            counts.record(false, false);
        }
        // Sensitivity denominator is zero -> 0.0; specificity is 1.0.
        assert_eq!(counts.balanced_accuracy(), 0.5);
    }

    #[test]
    fn test_record_and_reset() {
        let mut counts = ConfusionCounts::default();
        counts.record(true, true);
        counts.record(true, false);
        counts.record(false, true);
        counts.record(false, false);
        assert_eq!(
            counts,
            ConfusionCounts {
                true_positive: 1,
                false_positive: 1,
                false_negative: 1,
                true_negative: 1,
            }
        );
        counts.reset();
        assert_eq!(counts, ConfusionCounts::default());
    }
}
