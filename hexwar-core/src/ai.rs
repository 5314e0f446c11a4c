//! Alpha-beta search agent

use crate::agent::Agent;
use crate::board::{Board, Move};
use crate::config::SearchConfig;
use crate::error::{HexError, Result};
use crate::game::Player;
use crate::search::SearchEngine;
use crate::win::has_won;

/// How the last move was chosen
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
    /// Center cell on an empty board
    Opening,
    /// Completes our own connection
    Win,
    /// Occupies the cell that would complete the opponent's connection
    Block,
    /// Alpha-beta search result
    Search { score: f32, nodes: u64 },
}

/// Tactical shortcuts in front of a depth-limited alpha-beta search
pub struct AlphaBetaAgent {
    board: Board,
    player: Player,
    config: SearchConfig,
    last_decision: Option<Decision>,
}

impl AlphaBetaAgent {
    pub fn new(size: u8, player: Player, config: SearchConfig) -> Result<Self> {
        Ok(Self {
            board: Board::new(size)?,
            player,
            config,
            last_decision: None,
        })
    }

    /// How the most recent `choose_move` decided, None before the first move
    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    /// Pick a move for the current board without committing it
    pub fn select_move(&self) -> Result<(Move, Decision)> {
        let moves = self.board.legal_moves();
        if moves.is_empty() {
            return Err(HexError::NoLegalMoves);
        }

        if self.board.is_empty() {
            return Ok((self.board.center(), Decision::Opening));
        }

        if let Some(mv) = find_completing_move(&self.board, &moves, self.player) {
            return Ok((mv, Decision::Win));
        }

        if let Some(mv) = find_completing_move(&self.board, &moves, self.player.opponent()) {
            return Ok((mv, Decision::Block));
        }

        let mut engine = SearchEngine::new(&self.config, self.player);
        let (mv, score) = engine.best_move(&self.board).ok_or(HexError::NoLegalMoves)?;
        Ok((mv, Decision::Search { score, nodes: engine.nodes() }))
    }
}

/// First move in scan order that wins immediately for `player`
fn find_completing_move(board: &Board, moves: &[Move], player: Player) -> Option<Move> {
    moves.iter().copied().find(|&mv| {
        let mut trial = board.clone();
        trial.place(player, mv);
        has_won(&trial, player)
    })
}

impl Agent for AlphaBetaAgent {
    fn name(&self) -> &str {
        "AlphaBeta"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn choose_move(&mut self) -> Result<Move> {
        let (mv, decision) = self.select_move()?;
        tracing::debug!(player = ?self.player, %mv, ?decision, "alpha-beta move");
        self.board.set(self.player, mv)?;
        self.last_decision = Some(decision);
        Ok(mv)
    }

    fn report_opponent_move(&mut self, mv: Move) -> Result<()> {
        self.board.set(self.player.opponent(), mv)
    }
}

// ============================================================================
// TESTS
// ============================================================================
