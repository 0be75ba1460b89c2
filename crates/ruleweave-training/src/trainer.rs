//! The outer training loop.

use std::io;

use derive_more::{Display, Error, From};
use ruleweave_engine::{
    DatasetSplit, EnsembleVoter, Environment, EvaluationResult, Population,
    attribute_tracking::AttributeTracker,
    compaction::RuleCompactor,
    report::ReportWriter,
    timing::{NullTimer, Phase, PhaseTimer},
};
use ruleweave_evaluator::EvaluationStrategy;
use ruleweave_stats::{accuracy, tracking::TrackingWindow};

use crate::{
    config::TrainingConfig, events::EventBus, iteration::IterationController, reboot,
    state::TrainingState,
};

const TRACK_HEADER: &str = "Epoch\tExplore_Iteration\tMacroPopSize\tMicroPopSize\tRMSE\t\
                            Accuracy_Estimate\tRuleCount\tTreeCount\tAveGenerality\tExpRules\t\
                            Time(min)\n";

#[derive(Debug, Display, Error, From)]
pub enum TrainError {
    #[display("I/O error: {_0}")]
    Io(io::Error),
    #[display("{_0}")]
    Reboot(reboot::RebootError),
    #[display("this run mode requires a population resumed from a persisted run")]
    NotResumed,
}

/// Drives one complete training run.
///
/// Owns the population, the dataset environment, and the run state; the
/// prediction, compaction, attribute-tracking, report-writing, and timing
/// collaborators plug in behind their contracts. Construction is
/// builder-style: `new` wires the required collaborators, `with_*` the
/// optional ones.
pub struct Trainer<P: Population, E: Environment> {
    population: P,
    env: E,
    config: TrainingConfig,
    state: TrainingState,
    strategy: EvaluationStrategy,
    controller: IterationController,
    events: EventBus<P>,
    voter: Box<dyn EnsembleVoter<P>>,
    writer: Box<dyn ReportWriter<P>>,
    compactor: Option<Box<dyn RuleCompactor<P>>>,
    attribute_tracker: Option<Box<dyn AttributeTracker<P>>>,
    timer: Box<dyn PhaseTimer>,
    reboot_base: Option<String>,
}

impl<P: Population, E: Environment> Trainer<P, E> {
    /// # Panics
    ///
    /// Panics when the tracking frequency is zero or the checkpoint
    /// schedule is not strictly ascending.
    pub fn new(
        population: P,
        env: E,
        config: TrainingConfig,
        voter: Box<dyn EnsembleVoter<P>>,
        writer: Box<dyn ReportWriter<P>>,
    ) -> Self {
        assert!(config.tracking_frequency > 0, "tracking frequency must be positive");
        assert!(
            config.checkpoints.is_sorted_by(|a, b| a < b),
            "checkpoint schedule must be strictly ascending"
        );
        let strategy = EvaluationStrategy::for_target(env.target_kind());
        let controller = IterationController::new(config.rng_seed);
        let state = TrainingState::new(config.tracking_frequency);
        Self {
            population,
            env,
            config,
            state,
            strategy,
            controller,
            events: EventBus::new(),
            voter,
            writer,
            compactor: None,
            attribute_tracker: None,
            timer: Box::new(NullTimer),
            reboot_base: None,
        }
    }

    #[must_use]
    pub fn with_compactor(mut self, compactor: Box<dyn RuleCompactor<P>>) -> Self {
        self.compactor = Some(compactor);
        self
    }

    #[must_use]
    pub fn with_attribute_tracker(mut self, tracker: Box<dyn AttributeTracker<P>>) -> Self {
        self.attribute_tracker = Some(tracker);
        self
    }

    #[must_use]
    pub fn with_timer(mut self, timer: Box<dyn PhaseTimer>) -> Self {
        self.timer = timer;
        self
    }

    #[must_use]
    pub fn population(&self) -> &P {
        &self.population
    }

    #[must_use]
    pub fn into_population(self) -> P {
        self.population
    }

    #[must_use]
    pub fn environment(&self) -> &E {
        &self.env
    }

    #[must_use]
    pub fn state(&self) -> &TrainingState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn events_mut(&mut self) -> &mut EventBus<P> {
        &mut self.events
    }

    /// Handle that can stop the run between iterations.
    #[must_use]
    pub fn stop_signal(&self) -> crate::state::StopSignal {
        self.state.stop_signal()
    }

    /// Restores population-side run state from the reports persisted under
    /// `reboot_path` and shifts the iteration schedule past the completed
    /// count.
    pub fn resume(&mut self, reboot_path: &str) -> Result<(), TrainError> {
        let completed = reboot::completed_iterations(reboot_path)?;
        eprintln!("Rebooting run state after {completed} completed iterations.");
        self.config.shift_for_resume(completed);
        let snapshot = reboot::read_pop_stats(
            &format!("{reboot_path}_PopStats.txt"),
            self.env.target_kind().is_discrete(),
        )?;
        self.env.restore_pareto_fronts(&snapshot.pareto_fronts);
        self.state.resume_from(
            completed - 1,
            TrackingWindow::from_values(snapshot.correct_track),
            snapshot.first_epoch_complete,
        );
        self.reboot_base = Some(reboot_path.to_owned());
        Ok(())
    }

    /// Runs training to the configured iteration limit.
    pub fn run(&mut self) -> Result<(), TrainError> {
        if !self.state.is_resumed() {
            log_io(self.writer.append_track_record(TRACK_HEADER))?;
            self.seed_population();
        }
        eprintln!("Beginning learning iterations.");
        while self.state.iteration < self.config.max_iterations && !self.state.is_stop_requested() {
            self.run_one_iteration()?;
        }
        eprintln!("Learning complete.");
        Ok(())
    }

    fn run_one_iteration(&mut self) -> Result<(), TrainError> {
        let instance = self.env.current_instance(DatasetSplit::Train);
        let tracker = if self.config.do_attribute_tracking {
            self.attribute_tracker.as_deref_mut()
        } else {
            None
        };
        self.controller.run_iteration(
            &mut self.population,
            &instance,
            self.env.target_kind(),
            &self.config,
            &mut self.state,
            &*self.voter,
            tracker,
            &mut *self.timer,
        );

        let iteration = self.state.iteration;
        let frequency = self.config.tracking_frequency;
        if iteration % frequency == frequency - 1 && iteration > 0 {
            self.write_tracking_report()?;
        }
        if self.config.checkpoints.contains(&(iteration + 1)) || self.state.force_checkpoint {
            self.state.force_checkpoint = false;
            self.run_checkpoint()?;
        }

        self.events.publish_iteration(iteration);
        if iteration + 1 >= self.env.instance_count(DatasetSplit::Train) {
            self.state.first_epoch_complete = true;
        }
        self.state.iteration += 1;
        self.env.advance(DatasetSplit::Train);
        Ok(())
    }

    /// Offers training instances to the population so it starts from
    /// covering rules instead of empty.
    fn seed_population(&mut self) {
        let instances = self.env.instance_count(DatasetSplit::Train);
        if instances == 0 || self.config.init_rule_count == 0 {
            return;
        }
        eprintln!(
            "Seeding population from {} training instances.",
            self.config.init_rule_count
        );
        self.env.begin_evaluation();
        for offered in 0..self.config.init_rule_count {
            if offered % instances == 0 {
                self.env.reset(DatasetSplit::Train);
            }
            let instance = self.env.current_instance(DatasetSplit::Train);
            self.population
                .add_init_rule(&instance.features, &instance.label);
            self.env.advance(DatasetSplit::Train);
        }
        self.env.end_evaluation();
    }

    /// Appends the sliding-window progress record to the learning track.
    fn write_tracking_report(&mut self) -> Result<(), TrainError> {
        self.timer.start(Phase::Evaluation);
        let iteration = self.state.iteration;
        self.population.run_pop_ave_eval(iteration);
        let (tracked_accuracy, rmse) = if self.env.target_kind().is_discrete() {
            let counts = self.state.confusion;
            eprintln!(
                "TruePositives: {}\tTrueNegatives: {}\tFalsePositives: {}\tFalseNegatives: {}",
                counts.true_positive,
                counts.true_negative,
                counts.false_positive,
                counts.false_negative,
            );
            self.state.confusion.reset();
            (counts.balanced_accuracy(), 0.0)
        } else {
            let rmse = self.state.window.rmse();
            (accuracy::rmse_accuracy(rmse), rmse)
        };
        let record = self.population.progress_record(
            tracked_accuracy,
            rmse,
            iteration + 1,
            self.config.tracking_frequency,
        );
        log_io(self.writer.append_track_record(&record))?;
        self.timer.stop(Phase::Evaluation);
        self.events
            .publish_epoch(iteration, &self.population, tracked_accuracy);
        Ok(())
    }

    /// Full evaluation and report pass, plus the rule-compaction pass when
    /// this is the final checkpoint.
    fn run_checkpoint(&mut self) -> Result<(), TrainError> {
        let iteration = self.state.iteration;
        eprintln!("---------------------------------------------------------------");
        eprintln!(
            "Running complete population evaluation after {} iterations.",
            iteration + 1
        );
        let (train, test) = self.evaluate_population(iteration);
        let base = self.config.output_base.clone();
        self.write_reports(&base, iteration, &train, test.as_ref(), true)?;
        self.events.publish_checkpoint(&train, test.as_ref());

        let is_final = iteration + 1 == self.config.max_iterations;
        if is_final && self.config.do_rule_compaction && self.compactor.is_some() {
            self.run_final_compaction(iteration, &train, test.as_ref())?;
        }
        if !is_final {
            eprintln!("Continue learning...");
        }
        Ok(())
    }

    /// Refreshes the population statistics and evaluates both splits.
    fn evaluate_population(
        &mut self,
        iteration: usize,
    ) -> (EvaluationResult, Option<EvaluationResult>) {
        self.timer.start(Phase::Evaluation);
        self.population.run_pop_ave_eval(iteration);
        self.population.run_att_generality_sum();
        self.env.begin_evaluation();
        let train = self.strategy.evaluate(
            &mut self.population,
            &mut self.env,
            &*self.voter,
            DatasetSplit::Train,
            iteration,
            &mut self.state.prediction_log,
        );
        let test = self.env.has_test_data().then(|| {
            self.strategy.evaluate(
                &mut self.population,
                &mut self.env,
                &*self.voter,
                DatasetSplit::Test,
                iteration,
                &mut self.state.prediction_log,
            )
        });
        self.env.end_evaluation();
        self.timer.stop(Phase::Evaluation);
        (train, test)
    }

    fn write_reports(
        &mut self,
        base: &str,
        iteration: usize,
        train: &EvaluationResult,
        test: Option<&EvaluationResult>,
        include_tracking: bool,
    ) -> Result<(), TrainError> {
        self.timer.start(Phase::Output);
        log_io(self.writer.write_pop_stats(
            base,
            iteration + 1,
            &self.population,
            train,
            test,
            self.state.window.values(),
        ))?;
        log_io(self.writer.write_population(base, iteration + 1, &self.population))?;
        log_io(self.writer.write_attribute_cooccurrence(base, iteration + 1, &self.population))?;
        if include_tracking {
            log_io(self.writer.save_tracking(iteration, base))?;
        }
        log_io(self.writer.write_predictions(iteration, base, &self.state.prediction_log))?;
        self.timer.stop(Phase::Output);
        Ok(())
    }

    /// Final-checkpoint compaction: transform the rule set, re-evaluate,
    /// and rewrite every report under the `<base>_RC_<method>` namespace.
    fn run_final_compaction(
        &mut self,
        iteration: usize,
        train: &EvaluationResult,
        test: Option<&EvaluationResult>,
    ) -> Result<(), TrainError> {
        let Some(compactor) = self.compactor.as_deref_mut() else {
            return Ok(());
        };
        let method = compactor.method_name().to_owned();
        eprintln!("Running rule compaction ({method}).");
        self.timer.start(Phase::RuleCompaction);
        compactor.compact(
            &mut self.population,
            train.accuracy,
            test.map(|result| result.accuracy),
            iteration,
        );
        self.timer.stop(Phase::RuleCompaction);

        self.population.recalculate_numerosity_sum();
        let (train, test) = self.evaluate_population(iteration);
        let rc_base = format!("{}_RC_{}", self.config.output_base, method);
        self.write_reports(&rc_base, iteration, &train, test.as_ref(), false)?;
        Ok(())
    }

    /// Compacts a resumed population without further learning, using the
    /// accuracies persisted by the run being resumed.
    pub fn run_compaction_only(&mut self) -> Result<(), TrainError> {
        let Some(reboot_base) = self.reboot_base.clone() else {
            return Err(TrainError::NotResumed);
        };
        let Some(compactor) = self.compactor.as_deref_mut() else {
            return Err(TrainError::NotResumed);
        };
        let iteration = self.state.iteration;
        let (train_accuracy, test_accuracy) = reboot::read_saved_accuracies(
            &format!("{reboot_base}_PopStats.txt"),
            self.env.has_test_data(),
        )?;
        let method = compactor.method_name().to_owned();
        eprintln!("Running stand-alone rule compaction ({method}).");
        self.timer.start(Phase::RuleCompaction);
        compactor.compact(&mut self.population, train_accuracy, test_accuracy, iteration);
        self.timer.stop(Phase::RuleCompaction);

        self.population.recalculate_numerosity_sum();
        let (train, test) = self.evaluate_population(iteration);
        let rc_base = format!("{}_RC_{}", self.config.output_base, method);
        self.write_reports(&rc_base, iteration, &train, test.as_ref(), false)?;
        Ok(())
    }

    /// Re-evaluates a resumed population over the testing data only,
    /// patching the persisted statistics report in place.
    pub fn run_test_only(&mut self) -> Result<(), TrainError> {
        if !self.state.is_resumed() {
            return Err(TrainError::NotResumed);
        }
        if !self.env.has_test_data() {
            eprintln!("No testing data available; nothing to evaluate.");
            return Ok(());
        }
        let iteration = self.state.iteration;
        self.timer.start(Phase::Evaluation);
        self.population.run_pop_ave_eval(iteration);
        self.env.begin_evaluation();
        let test = self.strategy.evaluate(
            &mut self.population,
            &mut self.env,
            &*self.voter,
            DatasetSplit::Test,
            iteration,
            &mut self.state.prediction_log,
        );
        self.env.end_evaluation();
        self.timer.stop(Phase::Evaluation);

        self.timer.start(Phase::Output);
        log_io(self.writer.amend_pop_stats(&test))?;
        let base = self.config.output_base.clone();
        log_io(self.writer.write_predictions(iteration, &base, &self.state.prediction_log))?;
        self.timer.stop(Phase::Output);
        Ok(())
    }
}

impl<P: Population, E: Environment> std::fmt::Debug for Trainer<P, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trainer")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

fn log_io(result: io::Result<()>) -> Result<(), TrainError> {
    result.map_err(|error| {
        eprintln!(
            "I/O error({}): {error}",
            error
                .raw_os_error()
                .map_or_else(|| "?".to_owned(), |code| code.to_string())
        );
        TrainError::Io(error)
    })
}
