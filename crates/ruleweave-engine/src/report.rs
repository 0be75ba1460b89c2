//! Output/report writer contract.
//!
//! Report-file layout is owned by the writer implementation; the core only
//! decides when each report is written and under which base name. The
//! post-compaction pass uses a distinct `<base>_RC_<method>` namespace.

use std::io;

use crate::{evaluation::EvaluationResult, evaluation::PredictionLog, population::Population};

/// Persists population snapshots, running statistics, attribute
/// co-occurrence, and raw prediction lists, keyed by base name plus
/// iteration count.
pub trait ReportWriter<P: Population> {
    /// Appends one record (header or progress line) to the learning-track
    /// file.
    fn append_track_record(&mut self, record: &str) -> io::Result<()>;

    /// Writes the full statistics report, including the correctness
    /// tracking buffer needed for resumability.
    fn write_pop_stats(
        &mut self,
        base: &str,
        iteration: usize,
        population: &P,
        train: &EvaluationResult,
        test: Option<&EvaluationResult>,
        correct_track: &[f64],
    ) -> io::Result<()>;

    /// Writes the population snapshot.
    fn write_population(&mut self, base: &str, iteration: usize, population: &P)
    -> io::Result<()>;

    /// Writes the attribute co-occurrence report.
    fn write_attribute_cooccurrence(
        &mut self,
        base: &str,
        iteration: usize,
        population: &P,
    ) -> io::Result<()>;

    /// Persists cumulative timing/tracking totals.
    fn save_tracking(&mut self, iteration: usize, base: &str) -> io::Result<()>;

    /// Writes the raw prediction lists collected from the last test-data
    /// pass.
    fn write_predictions(
        &mut self,
        iteration: usize,
        base: &str,
        log: &PredictionLog,
    ) -> io::Result<()>;

    /// Patches the testing figures of an existing statistics report
    /// (test-only runs over a resumed population).
    fn amend_pop_stats(&mut self, test: &EvaluationResult) -> io::Result<()>;
}
