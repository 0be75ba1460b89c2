//! Ensemble-decision contract and its sentinels.
//!
//! The ensemble vote itself (fitness-weighted, numerosity-weighted, or
//! otherwise) is an external collaborator. The core's responsibility is
//! reacting to the two undecidable outcomes: no matching rule at all, or a
//! tie among matching rules with no plurality.

use crate::{instance::PhenotypeValue, population::Population};

/// Outcome of an ensemble vote over the current match set.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum EnsembleDecision {
    /// A decided phenotype value.
    #[display("{_0}")]
    Value(PhenotypeValue),
    /// No rule matched the instance.
    #[display("None")]
    NoMatch,
    /// Matching rules disagreed with no plurality.
    #[display("Tie")]
    Tie,
}

impl EnsembleDecision {
    /// The decided value, or `None` for either sentinel.
    #[must_use]
    pub fn value(&self) -> Option<&PhenotypeValue> {
        match self {
            EnsembleDecision::Value(value) => Some(value),
            EnsembleDecision::NoMatch | EnsembleDecision::Tie => None,
        }
    }

    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.value().is_some()
    }
}

/// An ensemble vote: the decision plus the per-category (or per-candidate)
/// decision set backing it, snapshotted for prediction reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsemblePrediction {
    pub decision: EnsembleDecision,
    pub decision_set: Vec<PhenotypeValue>,
}

/// The external voting collaborator.
pub trait EnsembleVoter<P: Population> {
    /// Votes over the population's current match set.
    fn predict(&self, population: &P, iteration: usize) -> EnsemblePrediction;
}
