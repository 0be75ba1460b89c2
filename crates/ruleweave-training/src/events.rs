//! Typed observer lists for the training loop.
//!
//! Three distinct subscription points replace a stringly-keyed callback
//! registry: per-iteration, per-tracking-report (epoch), and
//! per-checkpoint. Subscribers fire in registration order.

use ruleweave_engine::EvaluationResult;

type IterationFn = Box<dyn FnMut(usize)>;
type EpochFn<P> = Box<dyn FnMut(usize, &P, f64)>;
type CheckpointFn = Box<dyn FnMut(&EvaluationResult, Option<&EvaluationResult>)>;

/// Observer registry for one training run.
pub struct EventBus<P> {
    iteration: Vec<IterationFn>,
    epoch: Vec<EpochFn<P>>,
    checkpoint: Vec<CheckpointFn>,
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self {
            iteration: Vec::new(),
            epoch: Vec::new(),
            checkpoint: Vec::new(),
        }
    }
}

impl<P> std::fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("iteration_subscribers", &self.iteration.len())
            .field("epoch_subscribers", &self.epoch.len())
            .field("checkpoint_subscribers", &self.checkpoint.len())
            .finish()
    }
}

impl<P> EventBus<P> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires after every completed learning iteration with its 0-based
    /// index.
    pub fn on_iteration(&mut self, subscriber: impl FnMut(usize) + 'static) {
        self.iteration.push(Box::new(subscriber));
    }

    /// Fires after every tracking report with the iteration index, the
    /// population, and the tracked accuracy estimate.
    pub fn on_epoch(&mut self, subscriber: impl FnMut(usize, &P, f64) + 'static) {
        self.epoch.push(Box::new(subscriber));
    }

    /// Fires after every checkpoint evaluation with the training result and
    /// the testing result when test data exists.
    pub fn on_checkpoint(
        &mut self,
        subscriber: impl FnMut(&EvaluationResult, Option<&EvaluationResult>) + 'static,
    ) {
        self.checkpoint.push(Box::new(subscriber));
    }

    pub fn publish_iteration(&mut self, iteration: usize) {
        for subscriber in &mut self.iteration {
            subscriber(iteration);
        }
    }

    pub fn publish_epoch(&mut self, iteration: usize, population: &P, tracked_accuracy: f64) {
        for subscriber in &mut self.epoch {
            subscriber(iteration, population, tracked_accuracy);
        }
    }

    pub fn publish_checkpoint(
        &mut self,
        train: &EvaluationResult,
        test: Option<&EvaluationResult>,
    ) {
        for subscriber in &mut self.checkpoint {
            subscriber(train, test);
        }
    }
}
