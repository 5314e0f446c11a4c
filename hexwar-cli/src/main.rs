//! HEXWAR CLI - Command-line interface
//!
//! Commands:
//! - play: Play a single game between two agents
//! - match: Play a series of games on several board sizes

mod match_cmd;
mod play_cmd;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexwar_core::SearchConfig;

#[derive(Parser)]
#[command(name = "hexwar")]
#[command(about = "HEXWAR connection game with alpha-beta agents")]
struct Cli {
    /// Seed for reproducible agents (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play_cmd::PlayArgs),
    /// Play a series of games with alternating colors
    Match(match_cmd::MatchArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}

/// Search settings from an optional JSON file, with a depth override
pub(crate) fn load_search_config(path: Option<&Path>, depth: Option<u32>) -> Result<SearchConfig> {
    let config = match path {
        Some(p) => SearchConfig::load(p)?,
        None => SearchConfig::default(),
    };
    Ok(match depth {
        Some(d) => config.with_depth(d),
        None => config,
    })
}

/// Seconds from the command line as a time budget
pub(crate) fn time_budget(seconds: Option<f64>) -> Result<Option<Duration>> {
    seconds
        .map(|s| {
            Duration::try_from_secs_f64(s)
                .map_err(|e| anyhow::anyhow!("Invalid time limit {}: {}", s, e))
        })
        .transpose()
}
