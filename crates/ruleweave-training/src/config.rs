//! Run-level training parameters.

/// Parameters fixed for the duration of one training run.
///
/// Checkpoint iterations are 1-based counts of completed iterations: a
/// checkpoint of `5000` fires after the 5000th iteration finishes. The
/// final checkpoint must equal [`max_iterations`](Self::max_iterations) for
/// the rule-compaction pass to run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Total learning iterations to run.
    pub max_iterations: usize,
    /// Length of the sliding tracking window, in iterations.
    pub tracking_frequency: usize,
    /// Completed-iteration counts at which full evaluations run, ascending.
    pub checkpoints: Vec<usize>,
    /// Instances offered to the population during the seeding round.
    pub init_rule_count: usize,
    /// Run correct-set subsumption each iteration.
    pub do_subsumption: bool,
    /// Maintain per-attribute tracking scores each iteration.
    pub do_attribute_tracking: bool,
    /// Refresh attribute-feedback probabilities each iteration (requires
    /// tracking).
    pub do_attribute_feedback: bool,
    /// Run the rule-compaction transform at the final checkpoint.
    pub do_rule_compaction: bool,
    /// Path prefix under which every report file is written.
    pub output_base: String,
    /// Seed for the deterministic fallback-prediction generator.
    pub rng_seed: u64,
}

impl TrainingConfig {
    /// Baseline configuration running `max_iterations` iterations with one
    /// final checkpoint and all optional mechanisms off.
    #[must_use]
    pub fn new(max_iterations: usize, tracking_frequency: usize, output_base: &str) -> Self {
        Self {
            max_iterations,
            tracking_frequency,
            checkpoints: vec![max_iterations],
            init_rule_count: 0,
            do_subsumption: false,
            do_attribute_tracking: false,
            do_attribute_feedback: false,
            do_rule_compaction: false,
            output_base: output_base.to_owned(),
            rng_seed: 0,
        }
    }

    /// Shifts the iteration schedule forward after resuming a run that
    /// already completed `completed` iterations.
    pub fn shift_for_resume(&mut self, completed: usize) {
        for checkpoint in &mut self.checkpoints {
            *checkpoint += completed;
        }
        self.max_iterations += completed;
    }
}
