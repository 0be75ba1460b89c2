//! Prediction and full-population evaluation for the Ruleweave rule learner.
//!
//! This crate implements the two decision procedures that operate over a
//! match set and the evaluation engine built on top of them:
//!
//! 1. **Best-rule decision** ([`prediction`]) - deterministic selection of
//!    the highest-fitness matching rule's phenotype.
//! 2. **Per-category bookkeeping** ([`class_accuracy`]) - the accuracy
//!    buckets behind the discrete standard/balanced statistics.
//! 3. **Evaluation engine** ([`evaluation`]) - read-only full passes over a
//!    train or test split, with structurally distinct strategies for
//!    discrete and continuous targets behind one interface.
//!
//! # Architecture
//!
//! ```text
//! EvaluationStrategy (full dataset pass)
//!     ↓ per instance
//! EnsembleVoter (external) + best_decision (this crate)
//!     ↓ aggregated by
//! ClassAccuracy / ConfusionCounts / RMSE helpers (ruleweave-stats)
//!     ↓ produces
//! EvaluationResult + PredictionLog
//! ```
//!
//! # Read-only guarantee
//!
//! Evaluation never mutates the rule population's fitness or structure: it
//! forms evaluation-only match sets (no covering), reads rules, and clears
//! the transient sets it created. Running the same pass twice over a frozen
//! population and dataset yields identical results.

pub mod class_accuracy;
pub mod evaluation;
pub mod prediction;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::evaluation::EvaluationStrategy;
