//! Coverage adjustment and RMSE-derived accuracy.

/// Expected error-derived accuracy of uniform random guessing over a
/// normalized `[0, 1]` continuous range. Used as the chance prior when
/// blending continuous accuracy with uncovered instances.
pub const CONTINUOUS_CHANCE_ACCURACY: f64 = 1.0 / 3.0;

/// Numerator over denominator, defaulting to 0.0 on a zero denominator.
///
/// ```
/// use ruleweave_stats::accuracy::guarded_ratio;
///
/// assert_eq!(guarded_ratio(3.0, 4.0), 0.75);
/// assert_eq!(guarded_ratio(3.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Blends a raw accuracy with the chance-guessing rate in proportion to the
/// fraction of instances for which no prediction was made:
/// `accuracy * prediction_made + chance * (1 - prediction_made)`.
///
/// This removes the bias uncovered or ambiguous instances would otherwise
/// introduce by crediting them with the chance rate.
///
/// ```
/// use ruleweave_stats::accuracy::coverage_adjusted;
///
/// // 2 categories, 10 instances, 2 uncovered + 1 tie -> predictionMade 0.7
/// let adjusted = coverage_adjusted(0.9, 0.7, 0.5);
/// assert!((adjusted - 0.78).abs() < 1e-12);
/// ```
#[must_use]
pub fn coverage_adjusted(accuracy: f64, prediction_made: f64, chance: f64) -> f64 {
    accuracy * prediction_made + chance * (1.0 - prediction_made)
}

/// Root-mean-square error over `covered` instances, or `None` when nothing
/// was covered (RMSE is undefined, never raised).
#[must_use]
pub fn rmse(sum_squared_error: f64, covered: usize) -> Option<f64> {
    if covered == 0 {
        None
    } else {
        #[expect(clippy::cast_precision_loss)]
        let n = covered as f64;
        Some((sum_squared_error / n).sqrt())
    }
}

/// Maps an RMSE to an accuracy in `(0, 1]`, decreasing in error:
/// `1 / (1 + rmse)`.
///
/// ```
/// use ruleweave_stats::accuracy::rmse_accuracy;
///
/// assert!((rmse_accuracy(0.5) - 2.0 / 3.0).abs() < 1e-12);
/// assert_eq!(rmse_accuracy(0.0), 1.0);
/// ```
#[must_use]
pub fn rmse_accuracy(rmse: f64) -> f64 {
    1.0 / (1.0 + rmse)
}
