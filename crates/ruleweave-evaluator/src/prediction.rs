//! Best-rule decision over the current match set.

use ruleweave_engine::{PhenotypeValue, Population, Rule as _};

/// Selects the decision of the highest-fitness rule in the current match
/// set.
///
/// Rules are scanned in match-set order; a rule replaces the running
/// candidate only on strictly greater fitness, so ties keep the earliest
/// rule and the result is deterministic for a fixed scan order and fixed
/// fitness values. Interval phenotypes collapse to their arithmetic
/// midpoint; tree-like phenotypes are returned verbatim.
///
/// Returns `None` when the match set is empty - the caller decides how an
/// undecidable instance is counted (uncovered during evaluation, randomized
/// fallback during training).
#[must_use]
pub fn best_decision<P: Population>(population: &P) -> Option<PhenotypeValue> {
    let mut references = population.match_set().iter().copied();
    let mut best = population.rule(references.next()?);
    for reference in references {
        let candidate = population.rule(reference);
        if candidate.fitness() > best.fitness() {
            best = candidate;
        }
    }
    Some(best.phenotype().decision())
}
