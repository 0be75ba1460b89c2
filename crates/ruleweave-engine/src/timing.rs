//! Observational phase timing.
//!
//! Timing brackets evaluation, subsumption, attribute-tracking,
//! rule-compaction, and output phases purely for reporting; it never affects
//! control flow.

use derive_more::Display;

/// Instrumented phases of the training loop.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Evaluation,
    Subsumption,
    AttributeTracking,
    RuleCompaction,
    Output,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Evaluation,
        Phase::Subsumption,
        Phase::AttributeTracking,
        Phase::RuleCompaction,
        Phase::Output,
    ];
}

/// Brackets phases of the training loop.
pub trait PhaseTimer {
    fn start(&mut self, phase: Phase);
    fn stop(&mut self, phase: Phase);
}

/// Timer that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTimer;

impl PhaseTimer for NullTimer {
    fn start(&mut self, _phase: Phase) {}
    fn stop(&mut self, _phase: Phase) {}
}
