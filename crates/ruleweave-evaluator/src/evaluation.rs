//! Full-population evaluation over a train or test split.
//!
//! The target kind is decided once, at strategy construction; the two
//! strategies share the pass structure (evaluation-only match set, ensemble
//! and best-rule decision, transient-set cleanup per instance) but aggregate
//! differently:
//!
//! - **Discrete**: per-category accuracy buckets plus separate binary 2×2
//!   confusion matrices for the ensemble and the best-rule decisions.
//!   Uncovered and tied instances are excluded from the per-category
//!   buckets and credited with the chance-guessing rate by the coverage
//!   adjustment.
//! - **Continuous**: squared prediction error accumulated over covered
//!   instances (ties count as uncovered), reported as RMSE and the derived
//!   `1 / (1 + RMSE)` accuracy, blended with a fixed 1/3 chance prior in
//!   proportion to the uncovered fraction.

use ruleweave_engine::{
    DatasetSplit, EnsembleDecision, EnsembleVoter, Environment, EvaluationResult, Instance,
    PhenotypeValue, Population, PredictionLog, TargetKind,
};
use ruleweave_stats::{
    accuracy::{self, CONTINUOUS_CHANCE_ACCURACY},
    confusion::ConfusionCounts,
};

use crate::{class_accuracy::ClassAccuracy, prediction};

/// Evaluation algorithm for one target kind.
///
/// Built once at initialization from the environment's [`TargetKind`];
/// every checkpoint evaluation then dispatches through [`evaluate`].
///
/// [`evaluate`]: EvaluationStrategy::evaluate
#[derive(Debug, Clone)]
pub enum EvaluationStrategy {
    Discrete(DiscreteEvaluation),
    Continuous(ContinuousEvaluation),
}

impl EvaluationStrategy {
    #[must_use]
    pub fn for_target(kind: &TargetKind) -> Self {
        match kind {
            TargetKind::Discrete { categories } => {
                EvaluationStrategy::Discrete(DiscreteEvaluation {
                    categories: categories.clone(),
                })
            }
            TargetKind::Continuous { .. } => {
                EvaluationStrategy::Continuous(ContinuousEvaluation)
            }
        }
    }

    /// Runs one read-only full pass over the given split.
    ///
    /// The population is unchanged throughout: only the transient match and
    /// correct sets it creates are cleared. `log` is cleared at the start of
    /// every pass and filled only for test-data passes.
    pub fn evaluate<P, E, V>(
        &self,
        population: &mut P,
        env: &mut E,
        voter: &V,
        split: DatasetSplit,
        iteration: usize,
        log: &mut PredictionLog,
    ) -> EvaluationResult
    where
        P: Population,
        E: Environment + ?Sized,
        V: EnsembleVoter<P> + ?Sized,
    {
        match self {
            EvaluationStrategy::Discrete(strategy) => {
                strategy.evaluate(population, env, voter, split, iteration, log)
            }
            EvaluationStrategy::Continuous(strategy) => {
                strategy.evaluate(population, env, voter, split, iteration, log)
            }
        }
    }
}

fn split_name(split: DatasetSplit) -> &'static str {
    match split {
        DatasetSplit::Train => "TRAINING",
        DatasetSplit::Test => "TESTING",
    }
}

/// One instance's decisions, shared by both strategies.
struct InstanceDecisions {
    ensemble: EnsembleDecision,
    best: Option<PhenotypeValue>,
}

/// Forms the evaluation-only match set, collects both decisions, and logs
/// them for test passes. The per-instance cleanup (`advance`, `clear_sets`)
/// stays with the caller so aggregation happens between decision and
/// cleanup.
fn decide_instance<P, V>(
    population: &mut P,
    voter: &V,
    split: DatasetSplit,
    iteration: usize,
    log: &mut PredictionLog,
    instance: &Instance,
) -> InstanceDecisions
where
    P: Population,
    V: EnsembleVoter<P> + ?Sized,
{
    population.make_eval_match_set(instance);
    let prediction = voter.predict(population, iteration);
    let best = prediction::best_decision(population);
    if split == DatasetSplit::Test {
        log.record(
            prediction.decision.clone(),
            best.clone(),
            prediction.decision_set,
            instance.label.clone(),
        );
    }
    InstanceDecisions {
        ensemble: prediction.decision,
        best,
    }
}

/// Updates a binary 2×2 matrix when both prediction and truth are the
/// literal {0, 1} categories; anything else (sentinels, other categories,
/// continuous values) leaves the matrix untouched.
fn record_binary(
    counts: &mut ConfusionCounts,
    prediction: Option<&PhenotypeValue>,
    truth: &PhenotypeValue,
) {
    if let (Some(predicted), Some(actual)) = (
        prediction.and_then(PhenotypeValue::as_binary_class),
        truth.as_binary_class(),
    ) {
        counts.record(predicted, actual);
    }
}

/// Discrete-target evaluation.
#[derive(Debug, Clone)]
pub struct DiscreteEvaluation {
    categories: Vec<String>,
}

impl DiscreteEvaluation {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate<P, E, V>(
        &self,
        population: &mut P,
        env: &mut E,
        voter: &V,
        split: DatasetSplit,
        iteration: usize,
        log: &mut PredictionLog,
    ) -> EvaluationResult
    where
        P: Population,
        E: Environment + ?Sized,
        V: EnsembleVoter<P> + ?Sized,
    {
        env.reset(split);
        log.clear();
        let instances = env.instance_count(split);
        let chance = if self.categories.is_empty() {
            0.0
        } else {
            1.0 / self.categories.len() as f64
        };

        let mut class_accuracy = vec![ClassAccuracy::default(); self.categories.len()];
        let mut ensemble_counts = ConfusionCounts::default();
        let mut best_counts = ConfusionCounts::default();
        let mut no_match = 0_usize;
        let mut tie = 0_usize;

        for _ in 0..instances {
            let instance = env.current_instance(split);
            let decisions =
                decide_instance(population, voter, split, iteration, log, &instance);

            record_binary(
                &mut ensemble_counts,
                decisions.ensemble.value(),
                &instance.label,
            );
            record_binary(&mut best_counts, decisions.best.as_ref(), &instance.label);

            match &decisions.ensemble {
                EnsembleDecision::NoMatch => no_match += 1,
                EnsembleDecision::Tie => tie += 1,
                EnsembleDecision::Value(decision) => {
                    // Uncovered and tied instances are excluded here; the
                    // coverage adjustment credits them with the chance rate.
                    let accurate = *decision == instance.label;
                    for (category, bucket) in self.categories.iter().zip(&mut class_accuracy) {
                        let is_this_class = matches!(
                            &instance.label,
                            PhenotypeValue::Category(label) if label == category
                        );
                        bucket.update(is_this_class, accurate);
                    }
                }
            }

            env.advance(split);
            population.clear_sets();
        }

        let balanced = ensemble_counts.balanced_accuracy();
        let best_balanced = best_counts.balanced_accuracy();

        if no_match == instances {
            // Nothing was covered: report the chance-guessing rate directly
            // and skip the per-category statistics entirely.
            eprintln!("-----------------------------------------------");
            eprintln!("{} Accuracy Results:-------------", split_name(split));
            eprintln!("Instance Coverage = 0%");
            eprintln!("Prediction Ties = 0%");
            eprintln!("0 out of {instances} instances covered and correctly classified.");
            eprintln!("Standard Accuracy (Adjusted) = {chance}");
            eprintln!("Balanced Accuracy (Adjusted) = {chance}");
            return EvaluationResult {
                accuracy: chance,
                coverage: 0.0,
                best_accuracy: chance,
                rmse: None,
                best_rmse: None,
            };
        }

        let category_count = self.categories.len() as f64;
        let standard_accuracy = class_accuracy
            .iter()
            .map(ClassAccuracy::standard_accuracy)
            .sum::<f64>()
            / category_count;
        let macro_balanced_accuracy = class_accuracy
            .iter()
            .map(ClassAccuracy::balanced_accuracy)
            .sum::<f64>()
            / category_count;

        let prediction_fail = no_match as f64 / instances as f64;
        let prediction_ties = tie as f64 / instances as f64;
        let coverage = 1.0 - prediction_fail;
        let prediction_made = 1.0 - (prediction_fail + prediction_ties);

        let adjusted_standard =
            accuracy::coverage_adjusted(standard_accuracy, prediction_made, chance);
        let adjusted_balanced =
            accuracy::coverage_adjusted(macro_balanced_accuracy, prediction_made, chance);

        let correctly_classified: u64 = class_accuracy
            .iter()
            .map(ClassAccuracy::hits_in_class)
            .sum();

        eprintln!("-----------------------------------------------");
        eprintln!("{} Accuracy Results:-------------", split_name(split));
        eprintln!("Instance Coverage = {}%", coverage * 100.0);
        eprintln!("Prediction Ties = {}%", prediction_ties * 100.0);
        eprintln!(
            "{correctly_classified} out of {instances} instances covered and correctly classified."
        );
        eprintln!("Standard Accuracy (Adjusted) = {adjusted_standard}");
        eprintln!("Balanced Accuracy (Adjusted) = {adjusted_balanced}");
        eprintln!("Balanced Accuracy for best prediction = {best_balanced}");

        EvaluationResult {
            accuracy: balanced,
            coverage,
            best_accuracy: best_balanced,
            rmse: None,
            best_rmse: None,
        }
    }
}

/// Continuous-target evaluation.
#[derive(Debug, Clone)]
pub struct ContinuousEvaluation;

impl ContinuousEvaluation {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate<P, E, V>(
        &self,
        population: &mut P,
        env: &mut E,
        voter: &V,
        split: DatasetSplit,
        iteration: usize,
        log: &mut PredictionLog,
    ) -> EvaluationResult
    where
        P: Population,
        E: Environment + ?Sized,
        V: EnsembleVoter<P> + ?Sized,
    {
        env.reset(split);
        log.clear();
        let instances = env.instance_count(split);

        let mut no_match = 0_usize;
        let mut sum_squared_error = 0.0_f64;
        let mut best_sum_squared_error = 0.0_f64;

        for _ in 0..instances {
            let instance = env.current_instance(split);
            let decisions =
                decide_instance(population, voter, split, iteration, log, &instance);

            // Ties count as uncovered for continuous targets: there is no
            // plurality value to score an error against.
            match (decisions.ensemble.value(), &instance.label) {
                (Some(PhenotypeValue::Value(predicted)), PhenotypeValue::Value(truth)) => {
                    let error = (predicted - truth).abs();
                    sum_squared_error += error * error;
                    if let Some(PhenotypeValue::Value(best)) = decisions.best {
                        let best_error = (best - truth).abs();
                        best_sum_squared_error += best_error * best_error;
                    }
                }
                _ => no_match += 1,
            }

            env.advance(split);
            population.clear_sets();
        }

        let covered = instances - no_match;
        let coverage = if instances == 0 {
            0.0
        } else {
            1.0 - no_match as f64 / instances as f64
        };

        let Some(rmse) = accuracy::rmse(sum_squared_error, covered) else {
            // No instance covered: accuracy is 0 and RMSE is undefined.
            eprintln!("-----------------------------------------------");
            eprintln!("{} Accuracy Results:-------------", split_name(split));
            eprintln!("Instance Coverage = {}%", coverage * 100.0);
            eprintln!("Estimated Prediction Accuracy (Penalty uncovered) = 0");
            return EvaluationResult {
                accuracy: 0.0,
                coverage,
                best_accuracy: 0.0,
                rmse: None,
                best_rmse: None,
            };
        };
        let accuracy_estimate = accuracy::rmse_accuracy(rmse);
        let adjusted_accuracy =
            accuracy::coverage_adjusted(accuracy_estimate, coverage, CONTINUOUS_CHANCE_ACCURACY);
        let best_rmse = accuracy::rmse(best_sum_squared_error, covered);
        let best_accuracy = best_rmse.map_or(0.0, accuracy::rmse_accuracy);

        eprintln!("-----------------------------------------------");
        eprintln!("{} Accuracy Results:-------------", split_name(split));
        eprintln!("Instance Coverage = {}%", coverage * 100.0);
        eprintln!("Estimated Prediction Accuracy (Ignore uncovered) = {accuracy_estimate}");
        eprintln!("Estimated Prediction Accuracy (Penalty uncovered) = {adjusted_accuracy}");
        eprintln!("Estimated Prediction Accuracy for best rule = {best_accuracy}");
        eprintln!("Estimated RMSE for ensemble prediction = {rmse}");
        if let Some(best_rmse) = best_rmse {
            eprintln!("Estimated RMSE for best prediction = {best_rmse}");
        }

        EvaluationResult {
            accuracy: adjusted_accuracy,
            coverage,
            best_accuracy,
            rmse: Some(rmse),
            best_rmse,
        }
    }
}
