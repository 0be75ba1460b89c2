//! Evaluation results and prediction logging buffers.

use serde::{Deserialize, Serialize};

use crate::{instance::PhenotypeValue, voting::EnsembleDecision};

/// Immutable result of one full, non-mutating evaluation pass.
///
/// For discrete targets `accuracy` is the ensemble's binary balanced
/// accuracy and the RMSE fields are absent; for continuous targets
/// `accuracy` is the coverage-adjusted RMSE-derived estimate and both RMSE
/// fields are present when at least one instance was covered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub accuracy: f64,
    /// Fraction of instances with at least one matching rule.
    pub coverage: f64,
    /// Accuracy of the single best-fitness rule's decisions.
    pub best_accuracy: f64,
    pub rmse: Option<f64>,
    pub best_rmse: Option<f64>,
}

/// Parallel per-instance buffers filled during test-data evaluation passes,
/// consumed by the prediction report writer.
///
/// All four buffers hold one entry per evaluated instance, in dataset
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionLog {
    pub ensemble: Vec<EnsembleDecision>,
    pub best: Vec<Option<PhenotypeValue>>,
    pub decision_sets: Vec<Vec<PhenotypeValue>>,
    pub truth: Vec<PhenotypeValue>,
}

impl PredictionLog {
    pub fn clear(&mut self) {
        self.ensemble.clear();
        self.best.clear();
        self.decision_sets.clear();
        self.truth.clear();
    }

    pub fn record(
        &mut self,
        ensemble: EnsembleDecision,
        best: Option<PhenotypeValue>,
        decision_set: Vec<PhenotypeValue>,
        truth: PhenotypeValue,
    ) {
        self.ensemble.push(ensemble);
        self.best.push(best);
        self.decision_sets.push(decision_set);
        self.truth.push(truth);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ensemble.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ensemble.is_empty()
    }
}
