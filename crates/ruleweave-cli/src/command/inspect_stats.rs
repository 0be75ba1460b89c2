use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use ruleweave_training::reboot::{self, PopStatsSnapshot};
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, Args)]
pub struct InspectStatsArg {
    /// Path to a persisted `<base>_PopStats.txt` report
    stats_path: PathBuf,
    /// Treat the correctness buffer as continuous prediction errors
    #[arg(long)]
    continuous: bool,
    /// Output file path for the JSON report (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    generated_at: DateTime<Utc>,
    source: String,
    window_len: usize,
    window_mean: f64,
    front_sizes: [usize; 2],
    snapshot: PopStatsSnapshot,
}

pub fn run(arg: &InspectStatsArg) -> anyhow::Result<()> {
    let text = util::read_text_file("population statistics", &arg.stats_path)?;
    let snapshot = reboot::parse_pop_stats(&text, !arg.continuous)?;

    let window_len = snapshot.correct_track.len();
    #[expect(clippy::cast_precision_loss)]
    let window_mean = if window_len == 0 {
        0.0
    } else {
        snapshot.correct_track.iter().sum::<f64>() / window_len as f64
    };
    let front_sizes = [
        snapshot.pareto_fronts[0].rows[0].len(),
        snapshot.pareto_fronts[1].rows[0].len(),
    ];

    let report = StatsReport {
        generated_at: Utc::now(),
        source: arg.stats_path.display().to_string(),
        window_len,
        window_mean,
        front_sizes,
        snapshot,
    };
    util::save_json(&report, arg.output.clone())
}
