//! Resuming a persisted run from its population-statistics report.
//!
//! The statistics report is line-oriented with fixed offsets: the
//! correctness buffer sits on line 39 (0-indexed), the first-epoch flag on
//! line 41, and the two Pareto-front snapshots on line pairs 44/45 and
//! 47/48. Any structural mismatch is a hard failure; a run never resumes
//! from partially understood state.

use std::{fs, io, num};

use derive_more::{Display, Error, From};
use ruleweave_engine::ParetoFrontSnapshot;
use serde::Serialize;

/// Layout revision of the statistics report understood by this parser.
pub const POP_STATS_VERSION: u32 = 1;

const CORRECT_TRACK_LINE: usize = 39;
const EPOCH_FLAG_LINE: usize = 41;
const FRONT_LINES: [[usize; 2]; 2] = [[44, 45], [47, 48]];
const SAVED_ACCURACY_LINE: usize = 2;

/// State recovered from a persisted statistics report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopStatsSnapshot {
    pub version: u32,
    /// Sliding correctness/error buffer at the time of the save.
    pub correct_track: Vec<f64>,
    pub first_epoch_complete: bool,
    pub pareto_fronts: [ParetoFrontSnapshot; 2],
}

#[derive(Debug, Display, Error)]
pub enum PopStatsParseError {
    #[display("statistics report ends before line {line}")]
    MissingLine { line: usize },
    #[display("line {line} field {field} is not numeric: {source}")]
    NotNumeric {
        line: usize,
        field: usize,
        source: num::ParseFloatError,
    },
    #[display("line {line} field {field} is not a correctness flag: {value:?}")]
    BadCorrectnessEntry {
        line: usize,
        field: usize,
        value: String,
    },
    #[display("line {line} carries no recognizable epoch flag: {value:?}")]
    BadEpochFlag { line: usize, value: String },
}

#[derive(Debug, Display, Error, From)]
pub enum RebootError {
    #[display("I/O error: {_0}")]
    Io(io::Error),
    #[display("{_0}")]
    Parse(PopStatsParseError),
    #[display("output path {path:?} carries no trailing iteration count")]
    #[from(skip)]
    BadPath { path: String },
}

/// Iterations completed by the run persisted under `path`.
///
/// The count is the `_`-separated trailing component of the path, as
/// written by the checkpoint report pass.
pub fn completed_iterations(path: &str) -> Result<usize, RebootError> {
    let suffix = path.rsplit('_').next().unwrap_or_default();
    let completed = suffix.parse().map_err(|_| RebootError::BadPath {
        path: path.to_owned(),
    })?;
    if completed == 0 {
        return Err(RebootError::BadPath {
            path: path.to_owned(),
        });
    }
    Ok(completed)
}

/// Reads and parses the statistics report at `path`.
pub fn read_pop_stats(path: &str, discrete_target: bool) -> Result<PopStatsSnapshot, RebootError> {
    let text = read_report(path)?;
    Ok(parse_pop_stats(&text, discrete_target)?)
}

/// Parses a statistics report body.
///
/// `discrete_target` selects the element type of the correctness buffer:
/// integral correctness flags for discrete targets, prediction errors for
/// continuous ones.
pub fn parse_pop_stats(
    text: &str,
    discrete_target: bool,
) -> Result<PopStatsSnapshot, PopStatsParseError> {
    let lines: Vec<&str> = text.lines().collect();

    let correct_track = parse_correct_track(line(&lines, CORRECT_TRACK_LINE)?, discrete_target)?;
    let first_epoch_complete = parse_epoch_flag(line(&lines, EPOCH_FLAG_LINE)?)?;
    let mut fronts = [ParetoFrontSnapshot::default(), ParetoFrontSnapshot::default()];
    for (front, rows) in fronts.iter_mut().zip(FRONT_LINES) {
        for (row, row_line) in front.rows.iter_mut().zip(rows) {
            *row = parse_numeric_row(line(&lines, row_line)?, row_line)?;
        }
    }

    Ok(PopStatsSnapshot {
        version: POP_STATS_VERSION,
        correct_track,
        first_epoch_complete,
        pareto_fronts: fronts,
    })
}

/// Reads the saved training and testing accuracies from a statistics
/// report, as required by a compaction-only run.
pub fn read_saved_accuracies(
    path: &str,
    has_test_data: bool,
) -> Result<(f64, Option<f64>), RebootError> {
    let text = read_report(path)?;
    let lines: Vec<&str> = text.lines().collect();
    let row = parse_numeric_row(line(&lines, SAVED_ACCURACY_LINE)?, SAVED_ACCURACY_LINE)?;
    let train = *row.first().ok_or(PopStatsParseError::MissingLine {
        line: SAVED_ACCURACY_LINE,
    })?;
    let test = if has_test_data {
        Some(*row.get(1).ok_or(PopStatsParseError::MissingLine {
            line: SAVED_ACCURACY_LINE,
        })?)
    } else {
        None
    };
    Ok((train, test))
}

fn read_report(path: &str) -> Result<String, RebootError> {
    fs::read_to_string(path).map_err(|error| {
        eprintln!(
            "I/O error({}): {error}",
            error
                .raw_os_error()
                .map_or_else(|| "?".to_owned(), |code| code.to_string())
        );
        RebootError::Io(error)
    })
}

fn line<'a>(lines: &[&'a str], index: usize) -> Result<&'a str, PopStatsParseError> {
    lines
        .get(index)
        .copied()
        .ok_or(PopStatsParseError::MissingLine { line: index })
}

fn parse_correct_track(
    text: &str,
    discrete_target: bool,
) -> Result<Vec<f64>, PopStatsParseError> {
    let mut values = Vec::new();
    for (field, entry) in text.split('\t').enumerate() {
        let value = if discrete_target {
            let flag: i64 =
                entry
                    .trim()
                    .parse()
                    .map_err(|_| PopStatsParseError::BadCorrectnessEntry {
                        line: CORRECT_TRACK_LINE,
                        field,
                        value: entry.to_owned(),
                    })?;
            #[expect(clippy::cast_precision_loss)]
            let value = flag as f64;
            value
        } else {
            entry
                .trim()
                .parse()
                .map_err(|source| PopStatsParseError::NotNumeric {
                    line: CORRECT_TRACK_LINE,
                    field,
                    source,
                })?
        };
        values.push(value);
    }
    Ok(values)
}

fn parse_epoch_flag(text: &str) -> Result<bool, PopStatsParseError> {
    let flag = text.split('\t').next().unwrap_or_default().trim();
    match flag {
        "True" | "1" => Ok(true),
        "False" | "0" => Ok(false),
        _ => Err(PopStatsParseError::BadEpochFlag {
            line: EPOCH_FLAG_LINE,
            value: flag.to_owned(),
        }),
    }
}

fn parse_numeric_row(text: &str, line: usize) -> Result<Vec<f64>, PopStatsParseError> {
    text.split('\t')
        .filter(|entry| !entry.trim().is_empty())
        .enumerate()
        .map(|(field, entry)| {
            entry
                .trim()
                .parse()
                .map_err(|source| PopStatsParseError::NotNumeric {
                    line,
                    field,
                    source,
                })
        })
        .collect()
}
