use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "skillgauge", about = "Score simulated IT-support training sessions")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scoring config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a finished session from a JSON scoring context
    Score(commands::score::ScoreArgs),
    /// Replay a timed event script through the live tracker
    Replay(commands::replay::ReplayArgs),
    /// Show benchmark profiles
    Benchmarks(commands::benchmarks::BenchmarksArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load(cli.config.as_deref())?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Score(args) => commands::score::run(args, &config, &mut out),
        Commands::Replay(args) => commands::replay::run(args, &config, &mut out),
        Commands::Benchmarks(args) => commands::benchmarks::run(args, &config, &mut out),
    }
}
