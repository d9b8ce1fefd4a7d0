use super::SongSource;
use crate::reports;
use beatjudge::attempts::write_attempt_log;
use beatjudge::config::JudgeConfig;
use beatjudge::error::BjResult;
use beatjudge::judge::SessionSummary;
use beatjudge::session;
use beatjudge::simulate::SimulatedLearner;
use clap::Args;
use rayon::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: JudgeConfig,

    #[command(flatten)]
    pub source: SongSource,

    #[arg(short = 'n', long, default_value_t = 8)]
    pub runs: usize,

    #[arg(long, default_value_t = 0.8)]
    pub skill: f64,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Also write each run's attempts as CSV into this directory.
    #[arg(long)]
    pub dump_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: SimulateArgs, config: JudgeConfig) -> BjResult<()> {
    let song = args.source.resolve()?;
    info!(
        "🤖 Simulating {} learner(s) at skill {:.2} on '{}'",
        args.runs,
        args.skill,
        song.id()
    );

    let results: BjResult<Vec<(String, SessionSummary)>> = (0..args.runs)
        .into_par_iter()
        .map(|i| {
            let seed = args.seed.map(|s| s.wrapping_add(i as u64));
            let mut learner = SimulatedLearner::new(args.skill, seed);
            let attempts = learner.attempts_for(&song);

            if let Some(dir) = &args.dump_dir {
                let file = File::create(dir.join(format!("run_{:03}.csv", i)))?;
                write_attempt_log(file, &attempts)?;
            }

            let summary = session::replay(song.clone(), config.clone(), attempts)?;
            Ok((format!("run {}", i), summary))
        })
        .collect();
    let results = results?;

    if args.json {
        let only: Vec<&SessionSummary> = results.iter().map(|(_, s)| s).collect();
        println!("{}", serde_json::to_string_pretty(&only)?);
    } else {
        reports::print_summary_table(&results);
    }
    Ok(())
}
