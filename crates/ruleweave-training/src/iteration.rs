//! Single-instance learning step.

use rand::{Rng, SeedableRng, seq::IndexedRandom};
use rand_pcg::Pcg32;
use ruleweave_engine::{
    EnsembleDecision, EnsembleVoter, Instance, PhenotypeValue, Population, TargetKind,
    attribute_tracking::AttributeTracker,
    timing::{Phase, PhaseTimer},
};

use crate::{config::TrainingConfig, state::TrainingState};

/// Runs the per-instance learning step.
///
/// Owns the deterministic generator used to substitute a fallback
/// prediction when the ensemble reaches no decision.
#[derive(Debug)]
pub struct IterationController {
    rng: Pcg32,
}

impl IterationController {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// One learning iteration over the current training instance.
    ///
    /// Match set, tracked prediction, correct set, parameter updates, then
    /// the optional subsumption and attribute-tracking steps, the genetic
    /// algorithm, and deletion. Sets are cleared before returning.
    #[expect(clippy::too_many_arguments)]
    pub fn run_iteration<P: Population>(
        &mut self,
        population: &mut P,
        instance: &Instance,
        target: &TargetKind,
        config: &TrainingConfig,
        state: &mut TrainingState,
        voter: &dyn EnsembleVoter<P>,
        attribute_tracker: Option<&mut (dyn AttributeTracker<P> + '_)>,
        timer: &mut dyn PhaseTimer,
    ) {
        let iteration = state.iteration;
        population.make_match_set(instance, iteration);

        timer.start(Phase::Evaluation);
        let prediction = voter.predict(population, iteration);
        match prediction.decision {
            EnsembleDecision::Value(value) => {
                Self::track_prediction(&value, &instance.label, target, state);
            }
            EnsembleDecision::NoMatch | EnsembleDecision::Tie => {
                // A fallback value is drawn so the generator state advances
                // exactly as if a decision had been substituted, but it is
                // kept out of the tracking buffer and confusion counters.
                let _ = self.random_fallback(target);
            }
        }
        timer.stop(Phase::Evaluation);

        population.make_correct_set(&instance.label);
        population.update_sets(iteration, &instance.label);

        if config.do_subsumption {
            timer.start(Phase::Subsumption);
            population.do_correct_set_subsumption();
            timer.stop(Phase::Subsumption);
        }

        if config.do_attribute_tracking
            && let Some(tracker) = attribute_tracker
        {
            timer.start(Phase::AttributeTracking);
            tracker.update_tracking(population);
            tracker.update_percent(iteration);
            if config.do_attribute_feedback {
                tracker.regenerate_probabilities();
            }
            timer.stop(Phase::AttributeTracking);
        }

        population.run_ga(iteration, &instance.features, &instance.label);
        population.deletion(iteration);
        population.clear_sets();
    }

    /// Records a decided prediction into the sliding window and, for binary
    /// categorical targets, the confusion counters.
    fn track_prediction(
        decision: &PhenotypeValue,
        truth: &PhenotypeValue,
        target: &TargetKind,
        state: &mut TrainingState,
    ) {
        if target.is_discrete() {
            let accurate = decision == truth;
            state
                .window
                .record(state.iteration, if accurate { 1.0 } else { 0.0 });
            if let (Some(predicted), Some(actual)) =
                (decision.as_binary_class(), truth.as_binary_class())
            {
                state.confusion.record(predicted, actual);
            }
        } else if let (PhenotypeValue::Value(predicted), PhenotypeValue::Value(actual)) =
            (decision, truth)
        {
            state.window.record(state.iteration, (predicted - actual).abs());
        }
    }

    /// Random value over the target domain, used in place of an undecided
    /// ensemble vote.
    fn random_fallback(&mut self, target: &TargetKind) -> Option<PhenotypeValue> {
        match target {
            TargetKind::Discrete { categories } => categories
                .choose(&mut self.rng)
                .cloned()
                .map(PhenotypeValue::Category),
            TargetKind::Continuous { min, max } => {
                Some(PhenotypeValue::Value(self.rng.random_range(*min..=*max)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ruleweave_engine::timing::NullTimer;

    use super::*;
    use crate::test_support::{ConstantVoter, RecordingPopulation, RecordingTracker};

    fn discrete_target() -> TargetKind {
        TargetKind::Discrete {
            categories: vec!["0".to_owned(), "1".to_owned()],
        }
    }

    fn instance(label: &str) -> Instance {
        Instance {
            features: vec![1.0, 2.0],
            label: PhenotypeValue::Category(label.to_owned()),
        }
    }

    fn run_once(
        config: &TrainingConfig,
        state: &mut TrainingState,
        population: &mut RecordingPopulation,
        decision: EnsembleDecision,
        tracker: Option<&mut (dyn AttributeTracker<RecordingPopulation> + '_)>,
    ) {
        let mut controller = IterationController::new(7);
        let voter = ConstantVoter::new(decision);
        controller.run_iteration(
            population,
            &instance("1"),
            &discrete_target(),
            config,
            state,
            &voter,
            tracker,
            &mut NullTimer,
        );
    }

    #[test]
    fn test_baseline_operator_order() {
        let config = TrainingConfig::new(10, 5, "Out");
        let mut state = TrainingState::new(5);
        let mut population = RecordingPopulation::new();
        run_once(
            &config,
            &mut state,
            &mut population,
            EnsembleDecision::Value(PhenotypeValue::Category("1".to_owned())),
            None,
        );
        assert_eq!(
            population.operations(),
            vec![
                "make_match_set",
                "make_correct_set",
                "update_sets",
                "run_ga",
                "deletion",
                "clear_sets",
            ]
        );
    }

    #[test]
    fn test_subsumption_runs_between_updates_and_ga() {
        let mut config = TrainingConfig::new(10, 5, "Out");
        config.do_subsumption = true;
        let mut state = TrainingState::new(5);
        let mut population = RecordingPopulation::new();
        run_once(
            &config,
            &mut state,
            &mut population,
            EnsembleDecision::Value(PhenotypeValue::Category("1".to_owned())),
            None,
        );
        assert_eq!(
            population.operations(),
            vec![
                "make_match_set",
                "make_correct_set",
                "update_sets",
                "do_correct_set_subsumption",
                "run_ga",
                "deletion",
                "clear_sets",
            ]
        );
    }

    #[test]
    fn test_attribute_tracking_without_feedback() {
        let mut config = TrainingConfig::new(10, 5, "Out");
        config.do_attribute_tracking = true;
        let mut state = TrainingState::new(5);
        let mut population = RecordingPopulation::new();
        let mut tracker = RecordingTracker::default();
        let counts = tracker.counts();
        run_once(
            &config,
            &mut state,
            &mut population,
            EnsembleDecision::Value(PhenotypeValue::Category("1".to_owned())),
            Some(&mut tracker),
        );
        assert_eq!(counts.borrow().tracking_updates, 1);
        assert_eq!(counts.borrow().percent_updates, 1);
        assert_eq!(counts.borrow().probability_refreshes, 0);
    }

    #[test]
    fn test_attribute_feedback_refreshes_probabilities() {
        let mut config = TrainingConfig::new(10, 5, "Out");
        config.do_attribute_tracking = true;
        config.do_attribute_feedback = true;
        let mut state = TrainingState::new(5);
        let mut population = RecordingPopulation::new();
        let mut tracker = RecordingTracker::default();
        let counts = tracker.counts();
        run_once(
            &config,
            &mut state,
            &mut population,
            EnsembleDecision::Value(PhenotypeValue::Category("1".to_owned())),
            Some(&mut tracker),
        );
        assert_eq!(counts.borrow().probability_refreshes, 1);
    }

    #[test]
    fn test_correct_discrete_prediction_updates_window_and_confusion() {
        let config = TrainingConfig::new(10, 5, "Out");
        let mut state = TrainingState::new(5);
        let mut population = RecordingPopulation::new();
        run_once(
            &config,
            &mut state,
            &mut population,
            EnsembleDecision::Value(PhenotypeValue::Category("1".to_owned())),
            None,
        );
        assert_eq!(state.window.values()[0], 1.0);
        assert_eq!(state.confusion.true_positive, 1);
    }

    #[test]
    fn test_undecided_prediction_is_never_recorded() {
        let config = TrainingConfig::new(10, 5, "Out");
        for decision in [EnsembleDecision::NoMatch, EnsembleDecision::Tie] {
            let mut state = TrainingState::new(5);
            let mut population = RecordingPopulation::new();
            run_once(&config, &mut state, &mut population, decision, None);
            assert!(state.window.values().iter().all(|&value| value == 0.0));
            assert_eq!(state.confusion.true_positive, 0);
            assert_eq!(state.confusion.false_positive, 0);
            assert_eq!(state.confusion.true_negative, 0);
            assert_eq!(state.confusion.false_negative, 0);
        }
    }

    #[test]
    fn test_continuous_prediction_records_absolute_error() {
        let mut controller = IterationController::new(7);
        let target = TargetKind::Continuous { min: 0.0, max: 10.0 };
        let config = TrainingConfig::new(10, 5, "Out");
        let mut state = TrainingState::new(5);
        let mut population = RecordingPopulation::new();
        let voter = ConstantVoter::new(EnsembleDecision::Value(PhenotypeValue::Value(3.0)));
        let instance = Instance {
            features: vec![1.0],
            label: PhenotypeValue::Value(5.5),
        };
        controller.run_iteration(
            &mut population,
            &instance,
            &target,
            &config,
            &mut state,
            &voter,
            None,
            &mut NullTimer,
        );
        assert!((state.window.values()[0] - 2.5).abs() < 1e-12);
    }
}
