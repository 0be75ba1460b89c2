use clap::{Parser, Subcommand};

use self::{
    inspect_stats::InspectStatsArg, plan_resume::PlanResumeArg, track_summary::TrackSummaryArg,
};

mod inspect_stats;
mod plan_resume;
mod track_summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Inspect a persisted population-statistics report
    InspectStats(#[clap(flatten)] InspectStatsArg),
    /// Plan the iteration schedule for resuming a persisted run
    PlanResume(#[clap(flatten)] PlanResumeArg),
    /// Summarize a learning-track file
    TrackSummary(#[clap(flatten)] TrackSummaryArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::InspectStats(arg) => inspect_stats::run(&arg)?,
        Mode::PlanResume(arg) => plan_resume::run(&arg)?,
        Mode::TrackSummary(arg) => track_summary::run(&arg)?,
    }
    Ok(())
}
