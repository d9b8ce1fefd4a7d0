use crate::reports;
use beatjudge::chart::Note;
use beatjudge::config::JudgeConfig;
use beatjudge::error::BjResult;
use beatjudge::judge::{Judge, SessionState};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: JudgeConfig,

    #[arg(short, long)]
    pub target: String,

    #[arg(short = 'p', long, default_value = "")]
    pub spoken: String,

    /// |attempt - target| in milliseconds.
    #[arg(short = 'd', long, default_value_t = 0.0)]
    pub diff_ms: f64,

    #[arg(long, default_value_t = 1)]
    pub tier: u8,

    /// Streak entering this note.
    #[arg(long, default_value_t = 0)]
    pub combo: u32,
}

pub fn run(args: ScoreArgs, config: JudgeConfig) -> BjResult<()> {
    let judge = Judge::new(config);
    let note = Note {
        id: "adhoc".to_string(),
        word: args.target.clone(),
        phonetic: String::new(),
        target_time_seconds: 0.0,
        difficulty_tier: args.tier,
        definition: None,
        hint: None,
    };

    let (verdict, state) = judge.judge_attempt(
        &note,
        &args.spoken,
        args.diff_ms.abs(),
        SessionState::with_combo(args.combo),
    );

    reports::print_verdict_table("Single Judgement", std::slice::from_ref(&verdict));
    println!(
        "Combo: {} -> {}   Score: {}",
        args.combo, state.combo, verdict.score
    );
    Ok(())
}
