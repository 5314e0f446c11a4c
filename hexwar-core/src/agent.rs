//! Agent contract and the random baseline player

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::ai::AlphaBetaAgent;
use crate::board::{Board, Move};
use crate::config::SearchConfig;
use crate::error::{HexError, Result};
use crate::game::Player;

/// A player that tracks its own copy of the board
///
/// The turn driver calls `choose_move` on the agent to move and
/// `report_opponent_move` on the other one with the same move.
pub trait Agent {
    /// Display name
    fn name(&self) -> &str;

    /// The side this agent plays
    fn player(&self) -> Player;

    /// The agent's view of the board
    fn board(&self) -> &Board;

    /// Pick a move and record it on the agent's own board
    fn choose_move(&mut self) -> Result<Move>;

    /// Record the opponent's move on the agent's own board
    fn report_opponent_move(&mut self, mv: Move) -> Result<()>;
}

/// Available agent implementations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Uniformly random legal moves
    Random,
    /// Tactical checks plus alpha-beta search
    Minimax,
}

impl AgentKind {
    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Minimax => "minimax",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(AgentKind::Random),
            "minimax" | "alphabeta" => Ok(AgentKind::Minimax),
            other => Err(format!("unknown agent kind: {} (expected random or minimax)", other)),
        }
    }
}

/// Create an agent of `kind` for a fresh board
pub fn build_agent(
    kind: AgentKind,
    size: u8,
    player: Player,
    config: &SearchConfig,
    seed: u64,
) -> Result<Box<dyn Agent>> {
    Ok(match kind {
        AgentKind::Random => Box::new(RandomAgent::with_seed(size, player, seed)?),
        AgentKind::Minimax => Box::new(AlphaBetaAgent::new(size, player, config.clone())?),
    })
}

// ============================================================================
// RANDOM AGENT
// ============================================================================

/// Plays a uniformly random empty cell
pub struct RandomAgent {
    board: Board,
    player: Player,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(size: u8, player: Player) -> Result<Self> {
        Self::with_seed(size, player, 42)
    }

    pub fn with_seed(size: u8, player: Player, seed: u64) -> Result<Self> {
        Ok(Self {
            board: Board::new(size)?,
            player,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "Random"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn choose_move(&mut self) -> Result<Move> {
        let moves = self.board.legal_moves();
        let mv = *moves.choose(&mut self.rng).ok_or(HexError::NoLegalMoves)?;
        self.board.set(self.player, mv)?;
        Ok(mv)
    }

    fn report_opponent_move(&mut self, mv: Move) -> Result<()> {
        self.board.set(self.player.opponent(), mv)
    }
}
