//! Attribute-tracking contract.

use crate::population::Population;

/// Long-term per-feature usage tracking and feedback, updated once per
/// learning iteration when enabled. The tracking heuristics themselves are
/// external.
pub trait AttributeTracker<P: Population> {
    /// Accumulates per-feature usage from the current correct set.
    fn update_tracking(&mut self, population: &P);

    /// Updates the tracking percentage for the current iteration.
    fn update_percent(&mut self, iteration: usize);

    /// Recomputes the feedback probabilities consumed by the genetic
    /// algorithm.
    fn regenerate_probabilities(&mut self);
}
