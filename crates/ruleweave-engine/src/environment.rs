//! Sequential, resettable access to training and testing data.

use serde::{Deserialize, Serialize};

use crate::instance::{DatasetSplit, Instance, TargetKind};

/// Two tab-separated rows of a serialized Pareto-front snapshot, as restored
/// from a persisted statistics file. The front's own semantics live in the
/// external front-tracking collaborator; only the restore format is carried
/// here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParetoFrontSnapshot {
    pub rows: [Vec<f64>; 2],
}

/// The dataset collaborator.
///
/// Training access is a deterministic round-robin cursor over the training
/// set. Evaluation mode suspends that cursor so a full evaluation pass can
/// walk either split without losing the training position.
pub trait Environment {
    fn target_kind(&self) -> &TargetKind;

    /// Number of instances in the given split.
    fn instance_count(&self, split: DatasetSplit) -> usize;

    /// Whether a testing dataset is available.
    fn has_test_data(&self) -> bool;

    /// The instance at the split's current cursor position.
    fn current_instance(&self, split: DatasetSplit) -> Instance;

    /// Advances the split's cursor, wrapping at the end of the dataset.
    fn advance(&mut self, split: DatasetSplit);

    /// Rewinds the split's cursor to the first instance.
    fn reset(&mut self, split: DatasetSplit);

    /// Suspends training-stream position advancement for a full pass.
    fn begin_evaluation(&mut self);

    /// Restores the training-stream position saved by [`begin_evaluation`].
    ///
    /// [`begin_evaluation`]: Environment::begin_evaluation
    fn end_evaluation(&mut self);

    /// Hands restored Pareto-front snapshots to the front-tracking
    /// collaborator during a resume.
    fn restore_pareto_fronts(&mut self, fronts: &[ParetoFrontSnapshot; 2]);
}
