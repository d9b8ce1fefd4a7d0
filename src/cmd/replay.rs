use super::SongSource;
use crate::reports;
use beatjudge::attempts::load_attempt_log_file;
use beatjudge::config::JudgeConfig;
use beatjudge::error::{BeatJudgeError, BjResult};
use beatjudge::judge::SessionSummary;
use beatjudge::session;
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub config: JudgeConfig,

    #[command(flatten)]
    pub source: SongSource,

    /// CSV attempt logs (timestamp_seconds,spoken_text), one session each.
    #[arg(required = true)]
    pub attempts: Vec<PathBuf>,

    /// Print summaries as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only print the summary table.
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

pub fn run(args: ReplayArgs, config: JudgeConfig) -> BjResult<()> {
    let song = args.source.resolve()?;
    info!(
        "🔁 Replaying {} attempt log(s) against '{}'",
        args.attempts.len(),
        song.id()
    );

    // Sessions are independent; each log gets its own state.
    let results: Vec<(String, BjResult<SessionSummary>)> = args
        .attempts
        .par_iter()
        .map(|path| {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            let summary = load_attempt_log_file(path)
                .and_then(|attempts| session::replay(song.clone(), config.clone(), attempts));
            (name, summary)
        })
        .collect();

    let mut summaries = Vec::with_capacity(results.len());
    let mut failures = 0;
    for (name, result) in results {
        match result {
            Ok(summary) => summaries.push((name, summary)),
            Err(e) => {
                error!("❌ {}: {}", name, e);
                failures += 1;
            }
        }
    }

    if args.json {
        let only: Vec<&SessionSummary> = summaries.iter().map(|(_, s)| s).collect();
        println!("{}", serde_json::to_string_pretty(&only)?);
    } else {
        if !args.quiet {
            for (name, s) in &summaries {
                reports::print_verdict_table(name, &s.verdicts);
            }
        }
        reports::print_summary_table(&summaries);
    }

    if failures > 0 {
        return Err(BeatJudgeError::Config(format!(
            "{} of {} attempt logs failed",
            failures,
            args.attempts.len()
        )));
    }
    Ok(())
}
