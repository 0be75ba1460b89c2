//! Wall-clock phase timer.

use std::{
    collections::HashMap,
    fmt::Write as _,
    time::{Duration, Instant},
};

use ruleweave_engine::timing::{Phase, PhaseTimer};

/// Accumulates wall-clock time per training phase.
///
/// `start` on an already running phase restarts its stopwatch; `stop` on a
/// phase that is not running is ignored.
#[derive(Debug, Default)]
pub struct WallTimer {
    totals: HashMap<Phase, Duration>,
    running: HashMap<Phase, Instant>,
}

impl WallTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated time for one phase, excluding any in-flight interval.
    #[must_use]
    pub fn total(&self, phase: Phase) -> Duration {
        self.totals.get(&phase).copied().unwrap_or_default()
    }

    /// Tab-separated per-phase totals in minutes, one line per phase.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = String::new();
        for phase in Phase::ALL {
            let minutes = self.total(phase).as_secs_f64() / 60.0;
            let _ = writeln!(out, "{phase}\t{minutes}");
        }
        out
    }
}

impl PhaseTimer for WallTimer {
    fn start(&mut self, phase: Phase) {
        self.running.insert(phase, Instant::now());
    }

    fn stop(&mut self, phase: Phase) {
        if let Some(started) = self.running.remove(&phase) {
            *self.totals.entry(phase).or_default() += started.elapsed();
        }
    }
}
