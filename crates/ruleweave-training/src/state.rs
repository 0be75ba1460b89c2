//! Mutable run state shared across the training loop.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use ruleweave_engine::PredictionLog;
use ruleweave_stats::{confusion::ConfusionCounts, tracking::TrackingWindow};

/// Cooperative cancellation flag.
///
/// Cloned handles share the flag; the training loop checks it once per
/// iteration and finishes the in-flight instance before stopping.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Mutable state of one training run.
#[derive(Debug)]
pub struct TrainingState {
    /// Completed learning iterations (0-based index of the next one).
    pub iteration: usize,
    /// Sliding correctness/error buffer over the tracking window.
    pub window: TrackingWindow,
    /// Binary confusion counters accumulated between tracking reports.
    pub confusion: ConfusionCounts,
    /// Whether every training instance has been seen at least once.
    pub first_epoch_complete: bool,
    /// Per-instance predictions captured during the latest test evaluation.
    pub prediction_log: PredictionLog,
    /// Forces a checkpoint at the end of the current iteration.
    pub force_checkpoint: bool,
    stop: StopSignal,
    resumed: bool,
}

impl TrainingState {
    #[must_use]
    pub fn new(tracking_window: usize) -> Self {
        Self {
            iteration: 0,
            window: TrackingWindow::new(tracking_window),
            confusion: ConfusionCounts::default(),
            first_epoch_complete: false,
            prediction_log: PredictionLog::default(),
            force_checkpoint: false,
            stop: StopSignal::new(),
            resumed: false,
        }
    }

    /// Handle that can stop the run from outside the loop.
    #[must_use]
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_stop_requested()
    }

    /// Overwrites the state with values restored from a persisted run.
    pub fn resume_from(&mut self, iteration: usize, window: TrackingWindow, first_epoch_complete: bool) {
        self.iteration = iteration;
        self.window = window;
        self.first_epoch_complete = first_epoch_complete;
        self.resumed = true;
    }

    /// Whether this state was restored from a persisted run.
    #[must_use]
    pub fn is_resumed(&self) -> bool {
        self.resumed
    }
}
