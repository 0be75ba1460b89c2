//! Rule-compaction contract.

use crate::population::Population;

/// One-shot post-training transform pruning and simplifying the rule set in
/// place. The compaction algorithm itself is external; the training loop
/// only decides when to invoke it (the final checkpoint) and re-evaluates
/// afterward.
pub trait RuleCompactor<P: Population> {
    /// Short method identifier used as the post-compaction report-name
    /// suffix.
    fn method_name(&self) -> &str;

    fn compact(
        &mut self,
        population: &mut P,
        train_accuracy: f64,
        test_accuracy: Option<f64>,
        iteration: usize,
    );
}
