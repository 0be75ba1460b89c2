//! Recording collaborator doubles for training-loop tests.

use std::{cell::RefCell, io, rc::Rc};

use ruleweave_engine::{
    DatasetSplit, EnsembleDecision, EnsemblePrediction, EnsembleVoter, Environment,
    EvaluationResult, Instance, ParetoFrontSnapshot, PhenotypeValue, Population, PredictionLog,
    Rule, RulePhenotype, TargetKind, attribute_tracking::AttributeTracker,
    compaction::RuleCompactor, report::ReportWriter,
};

pub(crate) struct StubRule;

impl Rule for StubRule {
    fn fitness(&self) -> f64 {
        1.0
    }

    fn phenotype(&self) -> RulePhenotype {
        RulePhenotype::Category("1".to_owned())
    }
}

/// Population recording the sequence of operator invocations.
pub(crate) struct RecordingPopulation {
    rule: StubRule,
    operations: Vec<String>,
    init_rules: usize,
    current: Vec<usize>,
}

impl RecordingPopulation {
    pub(crate) fn new() -> Self {
        Self {
            rule: StubRule,
            operations: Vec::new(),
            init_rules: 0,
            current: vec![0],
        }
    }

    pub(crate) fn operations(&self) -> Vec<&str> {
        self.operations.iter().map(String::as_str).collect()
    }

    pub(crate) fn init_rules(&self) -> usize {
        self.init_rules
    }

    fn record(&mut self, operation: &str) {
        self.operations.push(operation.to_owned());
    }
}

impl Population for RecordingPopulation {
    type Rule = StubRule;

    fn rule(&self, _reference: usize) -> &StubRule {
        &self.rule
    }

    fn match_set(&self) -> &[usize] {
        &self.current
    }

    fn make_match_set(&mut self, _instance: &Instance, _iteration: usize) {
        self.record("make_match_set");
        self.current = vec![0];
    }

    fn make_eval_match_set(&mut self, _instance: &Instance) {
        self.current = vec![0];
    }

    fn make_correct_set(&mut self, _label: &PhenotypeValue) {
        self.record("make_correct_set");
    }

    fn update_sets(&mut self, _iteration: usize, _label: &PhenotypeValue) {
        self.record("update_sets");
    }

    fn do_correct_set_subsumption(&mut self) {
        self.record("do_correct_set_subsumption");
    }

    fn run_ga(&mut self, _iteration: usize, _features: &[f64], _label: &PhenotypeValue) {
        self.record("run_ga");
    }

    fn deletion(&mut self, _iteration: usize) {
        self.record("deletion");
    }

    fn clear_sets(&mut self) {
        self.record("clear_sets");
        self.current.clear();
    }

    fn recalculate_numerosity_sum(&mut self) {
        self.record("recalculate_numerosity_sum");
    }

    fn run_pop_ave_eval(&mut self, _iteration: usize) {}
    fn run_att_generality_sum(&mut self) {}

    fn add_init_rule(&mut self, _features: &[f64], _label: &PhenotypeValue) {
        self.init_rules += 1;
    }

    fn progress_record(
        &self,
        tracked_accuracy: f64,
        rmse: f64,
        iteration: usize,
        _tracking_window: usize,
    ) -> String {
        format!("{iteration}\t{tracked_accuracy}\t{rmse}\n")
    }
}

/// Environment over in-memory instance vectors with wrap-around cursors.
pub(crate) struct VecEnvironment {
    target: TargetKind,
    train: Vec<Instance>,
    test: Vec<Instance>,
    train_pos: usize,
    test_pos: usize,
    saved_train_pos: Option<usize>,
    restored_fronts: Rc<RefCell<Option<[ParetoFrontSnapshot; 2]>>>,
}

impl VecEnvironment {
    pub(crate) fn new(target: TargetKind, train: Vec<Instance>, test: Vec<Instance>) -> Self {
        Self {
            target,
            train,
            test,
            train_pos: 0,
            test_pos: 0,
            saved_train_pos: None,
            restored_fronts: Rc::default(),
        }
    }

    pub(crate) fn restored_fronts(&self) -> Rc<RefCell<Option<[ParetoFrontSnapshot; 2]>>> {
        Rc::clone(&self.restored_fronts)
    }

    fn split(&self, split: DatasetSplit) -> &[Instance] {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Test => &self.test,
        }
    }
}

impl Environment for VecEnvironment {
    fn target_kind(&self) -> &TargetKind {
        &self.target
    }

    fn instance_count(&self, split: DatasetSplit) -> usize {
        self.split(split).len()
    }

    fn has_test_data(&self) -> bool {
        !self.test.is_empty()
    }

    fn current_instance(&self, split: DatasetSplit) -> Instance {
        let position = match split {
            DatasetSplit::Train => self.train_pos,
            DatasetSplit::Test => self.test_pos,
        };
        self.split(split)[position].clone()
    }

    fn advance(&mut self, split: DatasetSplit) {
        match split {
            DatasetSplit::Train => self.train_pos = (self.train_pos + 1) % self.train.len().max(1),
            DatasetSplit::Test => self.test_pos = (self.test_pos + 1) % self.test.len().max(1),
        }
    }

    fn reset(&mut self, split: DatasetSplit) {
        match split {
            DatasetSplit::Train => self.train_pos = 0,
            DatasetSplit::Test => self.test_pos = 0,
        }
    }

    fn begin_evaluation(&mut self) {
        self.saved_train_pos = Some(self.train_pos);
    }

    fn end_evaluation(&mut self) {
        if let Some(position) = self.saved_train_pos.take() {
            self.train_pos = position;
        }
    }

    fn restore_pareto_fronts(&mut self, fronts: &[ParetoFrontSnapshot; 2]) {
        *self.restored_fronts.borrow_mut() = Some(fronts.clone());
    }
}

/// Voter returning one fixed decision.
pub(crate) struct ConstantVoter {
    decision: EnsembleDecision,
}

impl ConstantVoter {
    pub(crate) fn new(decision: EnsembleDecision) -> Self {
        Self { decision }
    }
}

impl<P: Population> EnsembleVoter<P> for ConstantVoter {
    fn predict(&self, _population: &P, _iteration: usize) -> EnsemblePrediction {
        let decision = self.decision.clone();
        let decision_set = decision.value().cloned().into_iter().collect();
        EnsemblePrediction {
            decision,
            decision_set,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WriterCall {
    Track(String),
    PopStats { base: String, iteration: usize },
    Population { base: String, iteration: usize },
    AttributeCooccurrence { base: String, iteration: usize },
    SaveTracking { base: String, iteration: usize },
    Predictions { base: String, iteration: usize },
    Amend,
}

/// Writer recording every call; clones share the call log.
#[derive(Clone, Default)]
pub(crate) struct RecordingWriter {
    calls: Rc<RefCell<Vec<WriterCall>>>,
}

impl RecordingWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<WriterCall> {
        self.calls.borrow().clone()
    }
}

impl ReportWriter<RecordingPopulation> for RecordingWriter {
    fn append_track_record(&mut self, record: &str) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push(WriterCall::Track(record.to_owned()));
        Ok(())
    }

    fn write_pop_stats(
        &mut self,
        base: &str,
        iteration: usize,
        _population: &RecordingPopulation,
        _train: &EvaluationResult,
        _test: Option<&EvaluationResult>,
        _correct_track: &[f64],
    ) -> io::Result<()> {
        self.calls.borrow_mut().push(WriterCall::PopStats {
            base: base.to_owned(),
            iteration,
        });
        Ok(())
    }

    fn write_population(
        &mut self,
        base: &str,
        iteration: usize,
        _population: &RecordingPopulation,
    ) -> io::Result<()> {
        self.calls.borrow_mut().push(WriterCall::Population {
            base: base.to_owned(),
            iteration,
        });
        Ok(())
    }

    fn write_attribute_cooccurrence(
        &mut self,
        base: &str,
        iteration: usize,
        _population: &RecordingPopulation,
    ) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push(WriterCall::AttributeCooccurrence {
                base: base.to_owned(),
                iteration,
            });
        Ok(())
    }

    fn save_tracking(&mut self, iteration: usize, base: &str) -> io::Result<()> {
        self.calls.borrow_mut().push(WriterCall::SaveTracking {
            base: base.to_owned(),
            iteration,
        });
        Ok(())
    }

    fn write_predictions(
        &mut self,
        iteration: usize,
        base: &str,
        _log: &PredictionLog,
    ) -> io::Result<()> {
        self.calls.borrow_mut().push(WriterCall::Predictions {
            base: base.to_owned(),
            iteration,
        });
        Ok(())
    }

    fn amend_pop_stats(&mut self, _test: &EvaluationResult) -> io::Result<()> {
        self.calls.borrow_mut().push(WriterCall::Amend);
        Ok(())
    }
}

/// Compactor recording the iterations it was invoked at; clones share the
/// log.
pub(crate) struct RecordingCompactor {
    name: String,
    invocations: Rc<RefCell<Vec<usize>>>,
}

impl RecordingCompactor {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            invocations: Rc::default(),
        }
    }

    pub(crate) fn invocations(&self) -> Rc<RefCell<Vec<usize>>> {
        Rc::clone(&self.invocations)
    }
}

impl RuleCompactor<RecordingPopulation> for RecordingCompactor {
    fn method_name(&self) -> &str {
        &self.name
    }

    fn compact(
        &mut self,
        _population: &mut RecordingPopulation,
        _train_accuracy: f64,
        _test_accuracy: Option<f64>,
        iteration: usize,
    ) {
        self.invocations.borrow_mut().push(iteration);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TrackerCounts {
    pub(crate) tracking_updates: usize,
    pub(crate) percent_updates: usize,
    pub(crate) probability_refreshes: usize,
}

/// Tracker counting its update calls; the counts handle outlives the
/// tracker being moved into the trainer.
#[derive(Debug, Default)]
pub(crate) struct RecordingTracker {
    counts: Rc<RefCell<TrackerCounts>>,
}

impl RecordingTracker {
    pub(crate) fn counts(&self) -> Rc<RefCell<TrackerCounts>> {
        Rc::clone(&self.counts)
    }
}

impl AttributeTracker<RecordingPopulation> for RecordingTracker {
    fn update_tracking(&mut self, _population: &RecordingPopulation) {
        self.counts.borrow_mut().tracking_updates += 1;
    }

    fn update_percent(&mut self, _iteration: usize) {
        self.counts.borrow_mut().percent_updates += 1;
    }

    fn regenerate_probabilities(&mut self) {
        self.counts.borrow_mut().probability_refreshes += 1;
    }
}
