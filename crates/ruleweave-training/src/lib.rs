//! Training control loop for the Ruleweave rule learner.
//!
//! This crate drives learning over a configured number of iterations,
//! tracks estimated performance over a sliding window, runs complete
//! population evaluations at designated checkpoints, orchestrates the final
//! rule-compaction pass, and can resume a previously persisted run.
//!
//! # How training works
//!
//! 1. **Seed** - on a fresh start, an initialization round offers training
//!    instances to the population
//! 2. **Iterate** - each iteration forms the match and correct sets, tracks
//!    the ensemble prediction, updates rule statistics, and runs the
//!    genetic algorithm and deletion ([`iteration`])
//! 3. **Track** - once per tracking window, a running-accuracy estimate is
//!    appended to the learning-track file
//! 4. **Checkpoint** - at designated iterations, a full evaluation of the
//!    population runs over the training (and testing) data and every report
//!    is rewritten ([`trainer`])
//! 5. **Compact** - at the final checkpoint only, the optional
//!    rule-compaction transform runs, followed by a second evaluation and
//!    report pass under a distinct output namespace
//!
//! # Architecture
//!
//! ```text
//! RebootManager (optional, once)        reboot
//!     ↓ restores state
//! Trainer (outer loop)                  trainer
//!     ↓ per instance
//! IterationController                   iteration
//!     ↓ per instance
//! Population operators + EnsembleVoter  (external, ruleweave-engine traits)
//!     ↓ at checkpoints
//! EvaluationStrategy                    (ruleweave-evaluator)
//! ```
//!
//! Everything runs on one logical thread of control; the only cancellation
//! point is the cooperative [`state::StopSignal`], checked between
//! instances.

pub mod config;
pub mod events;
pub mod iteration;
pub mod reboot;
pub mod state;
pub mod timing;
pub mod trainer;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::{
    config::TrainingConfig,
    state::{StopSignal, TrainingState},
    trainer::{TrainError, Trainer},
};
