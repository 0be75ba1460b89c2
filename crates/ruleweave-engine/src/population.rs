//! The external rule store contract.
//!
//! Rule representation, matching, covering, subsumption, the genetic
//! algorithm, and deletion all live behind this trait. The training loop
//! drives these operators in a fixed order; the evaluation engine uses only
//! the read-only subset (`make_eval_match_set`, `rule`, `match_set`,
//! `clear_sets`).

use crate::{
    instance::{Instance, PhenotypeValue},
    rule::Rule,
};

/// The evolving rule population and its transient match/correct sets.
///
/// The match set holds references (indices) into the rule store, not copies;
/// it is recomputed per instance and cleared at the end of every iteration.
pub trait Population {
    type Rule: Rule;

    /// Resolves a match-set reference to its rule.
    fn rule(&self, reference: usize) -> &Self::Rule;

    /// References into the rule store for rules matching the current
    /// instance, in scan order.
    fn match_set(&self) -> &[usize];

    /// Forms the match set for a training instance. May trigger covering and
    /// insert new rules.
    fn make_match_set(&mut self, instance: &Instance, iteration: usize);

    /// Forms an evaluation-only match set: no covering, no insertion side
    /// effects.
    fn make_eval_match_set(&mut self, instance: &Instance);

    /// Forms the correct set: the subset of matched rules whose phenotype
    /// covers the true label.
    fn make_correct_set(&mut self, label: &PhenotypeValue);

    /// Updates rule-level statistics from the instance outcome.
    fn update_sets(&mut self, iteration: usize, label: &PhenotypeValue);

    /// Generalization-pressure step applied to the correct set.
    fn do_correct_set_subsumption(&mut self);

    /// Runs the genetic algorithm within the correct set; may insert
    /// offspring rules.
    fn run_ga(&mut self, iteration: usize, features: &[f64], label: &PhenotypeValue);

    /// Prunes the population back toward its configured maximum size.
    fn deletion(&mut self, iteration: usize);

    /// Clears the transient match and correct sets.
    fn clear_sets(&mut self);

    /// Recomputes the numerosity sum after external structural changes
    /// (rule compaction).
    fn recalculate_numerosity_sum(&mut self);

    /// Refreshes population-average statistics used by progress records.
    fn run_pop_ave_eval(&mut self, iteration: usize);

    /// Refreshes the attribute-generality summary used by checkpoint
    /// reports.
    fn run_att_generality_sum(&mut self);

    /// Offers one training instance to population initialization, before
    /// the learning loop starts.
    fn add_init_rule(&mut self, features: &[f64], label: &PhenotypeValue);

    /// One tab-separated learning-track record, terminated with a newline.
    /// The population owns the record layout because most of its fields
    /// (macro/micro size, generality, experience) are population statistics.
    fn progress_record(
        &self,
        tracked_accuracy: f64,
        rmse: f64,
        iteration: usize,
        tracking_window: usize,
    ) -> String;
}
