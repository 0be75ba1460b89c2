use std::path::PathBuf;

use clap::Args;
use ruleweave_training::{TrainingConfig, reboot};
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, Args)]
pub struct PlanResumeArg {
    /// Output base of the run to resume; its trailing `_<count>` component
    /// names the completed iterations
    reboot_path: String,
    /// Learning iterations the resumed run should add
    #[arg(long, default_value_t = 10_000)]
    iterations: usize,
    /// Checkpoint iterations within the added run, ascending
    /// (defaults to the final iteration only)
    #[arg(long, value_delimiter = ',')]
    checkpoints: Vec<usize>,
    /// Length of the sliding tracking window, in iterations
    #[arg(long, default_value_t = 50)]
    tracking_frequency: usize,
    /// Output file path for the JSON plan (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ResumePlan {
    reboot_path: String,
    completed_iterations: usize,
    resumed_iteration: usize,
    max_iterations: usize,
    checkpoints: Vec<usize>,
    tracking_frequency: usize,
}

pub fn run(arg: &PlanResumeArg) -> anyhow::Result<()> {
    let completed = reboot::completed_iterations(&arg.reboot_path)?;

    let mut config =
        TrainingConfig::new(arg.iterations, arg.tracking_frequency, &arg.reboot_path);
    if !arg.checkpoints.is_empty() {
        config.checkpoints = arg.checkpoints.clone();
    }
    config.shift_for_resume(completed);

    let plan = ResumePlan {
        reboot_path: arg.reboot_path.clone(),
        completed_iterations: completed,
        resumed_iteration: completed - 1,
        max_iterations: config.max_iterations,
        checkpoints: config.checkpoints,
        tracking_frequency: config.tracking_frequency,
    };
    util::save_json(&plan, arg.output.clone())
}
