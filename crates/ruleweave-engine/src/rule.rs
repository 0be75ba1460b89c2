//! Read-only view of an evolved rule.
//!
//! The core never mutates a rule; it only reads fitness and the predicted
//! phenotype. The rule's condition, its matching logic, and every mutation
//! path belong to the population collaborator.

use crate::instance::PhenotypeValue;

/// The phenotype a rule predicts.
///
/// Tree-like rules predict a category or scalar value verbatim; interval
/// rules (continuous domains) predict a `[lower, upper]` range whose
/// arithmetic midpoint is used as the point decision.
#[derive(Debug, Clone, PartialEq)]
pub enum RulePhenotype {
    Category(String),
    Value(f64),
    Interval { lower: f64, upper: f64 },
}

impl RulePhenotype {
    /// Collapses this phenotype to a point decision: verbatim for tree-like
    /// phenotypes, the interval midpoint for interval rules.
    #[must_use]
    pub fn decision(&self) -> PhenotypeValue {
        match self {
            RulePhenotype::Category(label) => PhenotypeValue::Category(label.clone()),
            RulePhenotype::Value(value) => PhenotypeValue::Value(*value),
            RulePhenotype::Interval { lower, upper } => {
                PhenotypeValue::Value((lower + upper) / 2.0)
            }
        }
    }
}

/// Read-only rule interface consumed by the prediction engine.
pub trait Rule {
    /// Real-valued, non-negative fitness.
    fn fitness(&self) -> f64;

    /// The predicted phenotype.
    fn phenotype(&self) -> RulePhenotype;
}
