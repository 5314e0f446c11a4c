//! Match command - play a series of games between two agent kinds
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexwar_core::{AgentKind, GameConfig, Player, SearchConfig, Termination};

use crate::play_cmd::build_game;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// First agent kind (plays Red in odd-numbered games)
    #[arg(long, default_value = "minimax")]
    pub first: AgentKind,

    /// Second agent kind (plays Red in even-numbered games)
    #[arg(long, default_value = "random")]
    pub second: AgentKind,

    /// Board sizes to play on
    #[arg(long, value_delimiter = ',', default_value = "10,11")]
    pub sizes: Vec<u8>,

    /// Games per board size (will alternate colors)
    #[arg(long, default_value = "6")]
    pub games: usize,

    /// Search depth override for minimax agents
    #[arg(long)]
    pub depth: Option<u32>,

    /// Search configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cumulative thinking time per agent per game, in seconds
    #[arg(long)]
    pub time_limit: Option<f64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    size: u8,
    /// Kind that played Red
    red: AgentKind,
    blue: AgentKind,
    winner: Option<Player>,
    termination: Option<Termination>,
    moves: usize,
}

impl GameRecord {
    /// Kind of the winning agent
    fn winning_kind(&self) -> Option<AgentKind> {
        self.winner.map(|p| match p {
            Player::Red => self.red,
            Player::Blue => self.blue,
        })
    }
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    red_wins: usize,
    blue_wins: usize,
    timeouts: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Resolve search and game settings
/// 2. Play the match (every size, alternating colors)
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let search = crate::load_search_config(args.config.as_deref(), args.depth)?;
    let budget = crate::time_budget(args.time_limit)?;

    tracing::info!(
        "Starting match: {} vs {} (sizes {:?}, {} games each, depth={})",
        args.first,
        args.second,
        args.sizes,
        args.games,
        search.depth
    );

    let results = play_match(&args, &search, budget, seed)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games of the match
fn play_match(
    args: &MatchArgs,
    search: &SearchConfig,
    budget: Option<std::time::Duration>,
    seed: Option<u64>,
) -> Result<MatchResults> {
    let mut rng = create_rng(seed);
    let base_seed: u64 = rng.gen();
    let total = args.sizes.len() * args.games;

    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut games = Vec::with_capacity(total);
    for &size in &args.sizes {
        for game_idx in 0..args.games {
            // Alternate colors for fairness
            let (red, blue) = if game_idx % 2 == 0 {
                (args.first, args.second)
            } else {
                (args.second, args.first)
            };
            let game_seed = base_seed.wrapping_add(games.len() as u64 * 12345);
            let config = GameConfig {
                size,
                time_budget: budget,
            };

            let record = play_single_game(games.len() + 1, &config, red, blue, search, game_seed)?;

            tracing::info!(
                "Game {} ({}x{}): {} vs {} -> {:?} in {} moves",
                record.game_number,
                size,
                size,
                red,
                blue,
                record.winning_kind(),
                record.moves
            );

            progress.inc(1);
            games.push(record);
        }
    }
    progress.finish_and_clear();

    Ok(compute_match_statistics(games, args.first, args.second))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results, args)?;
    } else {
        print_text_results(results, args);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game to completion
fn play_single_game(
    game_number: usize,
    config: &GameConfig,
    red: AgentKind,
    blue: AgentKind,
    search: &SearchConfig,
    seed: u64,
) -> Result<GameRecord> {
    let game = build_game(config, red, blue, search, seed)?;
    let outcome = game
        .play_to_end()
        .with_context(|| format!("Game {} aborted", game_number))?;

    Ok(GameRecord {
        game_number,
        size: config.size,
        red,
        blue,
        winner: outcome.winner(),
        termination: outcome.termination,
        moves: outcome.moves.len(),
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>, first: AgentKind, second: AgentKind) -> MatchResults {
    // Games between the same kind credit the first kind with every win
    let first_wins = games
        .iter()
        .filter(|g| g.winning_kind() == Some(first))
        .count();
    let second_wins = if first == second {
        0
    } else {
        games
            .iter()
            .filter(|g| g.winning_kind() == Some(second))
            .count()
    };
    let red_wins = games.iter().filter(|g| g.winner == Some(Player::Red)).count();
    let blue_wins = games.iter().filter(|g| g.winner == Some(Player::Blue)).count();
    let timeouts = games
        .iter()
        .filter(|g| g.termination == Some(Termination::Timeout))
        .count();

    let total_moves: usize = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        first_wins,
        second_wins,
        red_wins,
        blue_wins,
        timeouts,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        size: u8,
        red: AgentKind,
        blue: AgentKind,
        winner: u8,
        termination: Option<Termination>,
        moves: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        first: AgentKind,
        second: AgentKind,
        total_games: usize,
        first_wins: usize,
        second_wins: usize,
        red_wins: usize,
        blue_wins: usize,
        timeouts: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        first: args.first,
        second: args.second,
        total_games: results.games.len(),
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        red_wins: results.red_wins,
        blue_wins: results.blue_wins,
        timeouts: results.timeouts,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                size: g.size,
                red: g.red,
                blue: g.blue,
                winner: g.winner.map_or(0, Player::number),
                termination: g.termination,
                moves: g.moves,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize match results")?;
    println!("{}", json);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!(
        "{:<8} wins: {} ({:.1}%)",
        args.first.label(),
        results.first_wins,
        percent(results.first_wins, total)
    );
    println!(
        "{:<8} wins: {} ({:.1}%)",
        args.second.label(),
        results.second_wins,
        percent(results.second_wins, total)
    );
    println!("Red wins:  {} ({:.1}%)", results.red_wins, percent(results.red_wins, total));
    println!("Blue wins: {} ({:.1}%)", results.blue_wins, percent(results.blue_wins, total));
    println!("Timeouts:  {}", results.timeouts);
    println!("Avg moves: {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {} ({}x{}): {} (Red) vs {} (Blue) -> winner {} in {} moves",
            game.game_number,
            game.size,
            game.size,
            game.red,
            game.blue,
            game.winning_kind().map_or("none", AgentKind::label),
            game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
