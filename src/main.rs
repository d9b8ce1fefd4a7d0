use beatjudge::config::JudgeConfig;
use beatjudge::error::BjResult;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with timing windows and scoring rules.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Songs(cmd::songs::SongsArgs),
    Score(cmd::score::ScoreArgs),
    Replay(cmd::replay::ReplayArgs),
    Simulate(cmd::simulate::SimulateArgs),
}

/// File config as the base, CLI flags typed by the user on top.
fn resolve_config(
    path: &Option<String>,
    cli_config: &JudgeConfig,
    sub_matches: &ArgMatches,
) -> BjResult<JudgeConfig> {
    let config = match path {
        Some(path) => {
            info!("⚖️  Loading judge config from: {}", path);
            let mut file_config = JudgeConfig::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn execute(cli: Cli, matches: &ArgMatches) -> BjResult<()> {
    let sub_matches = matches.subcommand().map(|(_, m)| m).unwrap_or(matches);

    match cli.command {
        Commands::Songs(args) => {
            if cli.config_file.is_some() {
                warn!("⚠️  --config has no effect on 'songs'");
            }
            cmd::songs::run(args)
        }
        Commands::Score(args) => {
            let config = resolve_config(&cli.config_file, &args.config, sub_matches)?;
            cmd::score::run(args, config)
        }
        Commands::Replay(args) => {
            let config = resolve_config(&cli.config_file, &args.config, sub_matches)?;
            cmd::replay::run(args, config)
        }
        Commands::Simulate(args) => {
            let config = resolve_config(&cli.config_file, &args.config, sub_matches)?;
            cmd::simulate::run(args, config)
        }
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(cli, &matches) {
        error!("\n❌ FATAL: {}", e);
        process::exit(1);
    }
}
