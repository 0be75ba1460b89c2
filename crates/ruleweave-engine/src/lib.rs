//! Core data model and collaborator contracts for the Ruleweave rule-learning system.
//!
//! Ruleweave is a Michigan-style evolutionary rule learner: a population of
//! condition→prediction rules is evolved against a stream of labeled training
//! instances, periodically evaluated for generalization accuracy, and
//! optionally compacted after training. This crate defines the shared
//! vocabulary of that system and the narrow contracts through which the
//! training loop talks to its collaborators:
//!
//! - [`instance`] - labeled instances, phenotype values, and the target-kind
//!   decision (discrete categories vs. a continuous range)
//! - [`rule`] - the read-only view the core has of an evolved rule
//! - [`population`] - the external rule store and its set operators
//! - [`environment`] - sequential, resettable access to train/test data
//! - [`voting`] - the ensemble-decision collaborator and its sentinels
//! - [`evaluation`] - evaluation results and prediction logging buffers
//! - [`compaction`] - the one-shot rule-compaction transform
//! - [`attribute_tracking`] - long-term per-feature usage tracking
//! - [`report`] - the output/report writer contract
//! - [`timing`] - observational phase timing
//!
//! The training loop itself lives in `ruleweave-training`; the prediction and
//! evaluation algorithms live in `ruleweave-evaluator`. Neither the rule
//! representation, matching, covering, nor the genetic operators are defined
//! here - they stay behind the [`population::Population`] trait.

pub mod attribute_tracking;
pub mod compaction;
pub mod environment;
pub mod evaluation;
pub mod instance;
pub mod population;
pub mod report;
pub mod rule;
pub mod timing;
pub mod voting;

pub use self::{
    environment::{Environment, ParetoFrontSnapshot},
    evaluation::{EvaluationResult, PredictionLog},
    instance::{DatasetSplit, Instance, PhenotypeValue, TargetKind},
    population::Population,
    rule::{Rule, RulePhenotype},
    voting::{EnsembleDecision, EnsemblePrediction, EnsembleVoter},
};
