use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, Args)]
pub struct TrackSummaryArg {
    /// Path to a `<base>_LearnTrack.txt` file
    track_path: PathBuf,
    /// Output file path for the JSON summary (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TrackSummary {
    source: String,
    records: usize,
    final_iteration: usize,
    final_accuracy_estimate: f64,
    best_accuracy_estimate: f64,
    final_rmse: f64,
}

const ITERATION_COLUMN: usize = 1;
const RMSE_COLUMN: usize = 4;
const ACCURACY_COLUMN: usize = 5;

pub fn run(arg: &TrackSummaryArg) -> anyhow::Result<()> {
    let text = util::read_text_file("learning track", &arg.track_path)?;

    let mut records = 0;
    let mut final_iteration = 0;
    let mut final_accuracy = 0.0;
    let mut best_accuracy = 0.0_f64;
    let mut final_rmse = 0.0;
    // First line is the column header.
    for (index, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        final_iteration = parse_field(&fields, ITERATION_COLUMN, index)?;
        final_rmse = parse_field(&fields, RMSE_COLUMN, index)?;
        final_accuracy = parse_field(&fields, ACCURACY_COLUMN, index)?;
        best_accuracy = best_accuracy.max(final_accuracy);
        records += 1;
    }

    let summary = TrackSummary {
        source: arg.track_path.display().to_string(),
        records,
        final_iteration,
        final_accuracy_estimate: final_accuracy,
        best_accuracy_estimate: best_accuracy,
        final_rmse,
    };
    util::save_json(&summary, arg.output.clone())
}

fn parse_field<T>(fields: &[&str], column: usize, line: usize) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let field = fields
        .get(column)
        .with_context(|| format!("Track line {line} has no column {column}"))?;
    field
        .trim()
        .parse()
        .with_context(|| format!("Track line {line} column {column} is not numeric: {field:?}"))
}
