//! Scripted collaborator doubles for evaluator tests.

use std::cell::Cell;

use ruleweave_engine::{
    DatasetSplit, EnsembleDecision, EnsemblePrediction, EnsembleVoter, Environment, Instance,
    ParetoFrontSnapshot, PhenotypeValue, Population, Rule, RulePhenotype, TargetKind,
};

pub(crate) struct StubRule {
    fitness: f64,
    phenotype: RulePhenotype,
}

impl StubRule {
    pub(crate) fn new(fitness: f64, phenotype: RulePhenotype) -> Self {
        Self { fitness, phenotype }
    }
}

impl Rule for StubRule {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn phenotype(&self) -> RulePhenotype {
        self.phenotype.clone()
    }
}

/// Population whose match sets are scripted per evaluation call, cycling
/// through the plan so repeated passes see identical match sets.
pub(crate) struct StubPopulation {
    rules: Vec<StubRule>,
    match_plan: Vec<Vec<usize>>,
    cursor: usize,
    current: Vec<usize>,
}

impl StubPopulation {
    pub(crate) fn new(rules: Vec<StubRule>, match_plan: Vec<Vec<usize>>) -> Self {
        assert!(!match_plan.is_empty(), "match plan must not be empty");
        let current = match_plan[0].clone();
        Self {
            rules,
            match_plan,
            cursor: 0,
            current,
        }
    }
}

impl Population for StubPopulation {
    type Rule = StubRule;

    fn rule(&self, reference: usize) -> &StubRule {
        &self.rules[reference]
    }

    fn match_set(&self) -> &[usize] {
        &self.current
    }

    fn make_match_set(&mut self, instance: &Instance, _iteration: usize) {
        self.make_eval_match_set(instance);
    }

    fn make_eval_match_set(&mut self, _instance: &Instance) {
        self.current = self.match_plan[self.cursor % self.match_plan.len()].clone();
        self.cursor += 1;
    }

    fn make_correct_set(&mut self, _label: &PhenotypeValue) {}
    fn update_sets(&mut self, _iteration: usize, _label: &PhenotypeValue) {}
    fn do_correct_set_subsumption(&mut self) {}
    fn run_ga(&mut self, _iteration: usize, _features: &[f64], _label: &PhenotypeValue) {}
    fn deletion(&mut self, _iteration: usize) {}

    fn clear_sets(&mut self) {
        self.current.clear();
    }

    fn recalculate_numerosity_sum(&mut self) {}
    fn run_pop_ave_eval(&mut self, _iteration: usize) {}
    fn run_att_generality_sum(&mut self) {}
    fn add_init_rule(&mut self, _features: &[f64], _label: &PhenotypeValue) {}

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
        }
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

    fn restore_pareto_fronts(&mut self, _fronts: &[ParetoFrontSnapshot; 2]) {}
}

/// Voter replaying a scripted decision sequence, cycling so repeated passes
/// see identical votes.
pub(crate) struct ScriptedVoter {
    decisions: Vec<EnsembleDecision>,
    cursor: Cell<usize>,
}

impl ScriptedVoter {
    pub(crate) fn new(decisions: Vec<EnsembleDecision>) -> Self {
        assert!(!decisions.is_empty(), "decision script must not be empty");
        Self {
            decisions,
            cursor: Cell::new(0),
        }
    }
}

impl<P: Population> EnsembleVoter<P> for ScriptedVoter {
    fn predict(&self, _population: &P, _iteration: usize) -> EnsemblePrediction {
        let index = self.cursor.get();
        self.cursor.set(index + 1);
        let decision = self.decisions[index % self.decisions.len()].clone();
        let decision_set = decision.value().cloned().into_iter().collect();
        EnsemblePrediction {
            decision,
            decision_set,
        }
    }
}
