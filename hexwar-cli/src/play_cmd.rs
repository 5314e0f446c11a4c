//! Play command - a single game between two agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_game(), report_game()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use hexwar_core::{
    build_agent, AgentKind, Coord, Game, GameConfig, GameOutcome, Player, SearchConfig, Termination,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board side length
    #[arg(long, default_value = "9")]
    pub size: u8,

    /// Agent playing Red (connects left to right, moves first)
    #[arg(long, default_value = "minimax")]
    pub red: AgentKind,

    /// Agent playing Blue (connects top to bottom)
    #[arg(long, default_value = "random")]
    pub blue: AgentKind,

    /// Search depth override for minimax agents
    #[arg(long)]
    pub depth: Option<u32>,

    /// Search configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cumulative thinking time per agent, in seconds
    #[arg(long)]
    pub time_limit: Option<f64>,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let search = crate::load_search_config(args.config.as_deref(), args.depth)?;
    let game_config = GameConfig {
        size: args.size,
        time_budget: crate::time_budget(args.time_limit)?,
    };
    let seed = seed.unwrap_or_else(|| ChaCha8Rng::from_entropy().gen());

    tracing::info!(
        "Starting game: {} (Red) vs {} (Blue) on {}x{}, depth={}",
        args.red,
        args.blue,
        args.size,
        args.size,
        search.depth
    );

    let game = build_game(&game_config, args.red, args.blue, &search, seed)?;
    let outcome = game.play_to_end().context("Game aborted")?;

    report_game(&outcome, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Create both agents and the turn driver
pub(crate) fn build_game(
    config: &GameConfig,
    red: AgentKind,
    blue: AgentKind,
    search: &SearchConfig,
    seed: u64,
) -> Result<Game> {
    let red_agent = build_agent(red, config.size, Player::Red, search, seed)?;
    let blue_agent = build_agent(blue, config.size, Player::Blue, search, seed.wrapping_add(7777))?;
    Ok(Game::new(config, red_agent, blue_agent)?)
}

fn report_game(outcome: &GameOutcome, args: &PlayArgs) -> Result<()> {
    if args.json {
        print_json(outcome, args)?;
    } else {
        print_text(outcome, args);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_json(outcome: &GameOutcome, args: &PlayArgs) -> Result<()> {
    #[derive(Serialize)]
    struct JsonGame<'a> {
        size: u8,
        red: AgentKind,
        blue: AgentKind,
        winner: u8,
        termination: Option<Termination>,
        moves: &'a [Coord],
        red_seconds: f64,
        blue_seconds: f64,
    }

    let output = JsonGame {
        size: args.size,
        red: args.red,
        blue: args.blue,
        winner: outcome.result.winner_number(),
        termination: outcome.termination,
        moves: &outcome.moves,
        red_seconds: outcome.elapsed[0].as_secs_f64(),
        blue_seconds: outcome.elapsed[1].as_secs_f64(),
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize game result")?;
    println!("{}", json);
    Ok(())
}

fn print_text(outcome: &GameOutcome, args: &PlayArgs) {
    println!("\n=== Game Result ===");
    match outcome.winner() {
        Some(Player::Red) => println!("Red ({}) wins", args.red),
        Some(Player::Blue) => println!("Blue ({}) wins", args.blue),
        None => println!("No winner"),
    }
    if let Some(t) = outcome.termination {
        println!("Decided by:  {:?}", t);
    }
    println!("Moves:       {}", outcome.moves.len());
    println!(
        "Think time:  Red {:.2}s, Blue {:.2}s",
        outcome.elapsed[0].as_secs_f64(),
        outcome.elapsed[1].as_secs_f64()
    );

    let line: Vec<String> = outcome.moves.iter().map(ToString::to_string).collect();
    println!("\nMoves: {}", line.join(" "));
}
