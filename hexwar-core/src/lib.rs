//! HEXWAR Core - Hex connection game engine and AI
//!
//! This crate provides the core game logic for HEXWAR:
//! - Board geometry (rhombic hex grid with axial coordinates)
//! - Connection win detection
//! - Group connectivity and edge-pattern analysis
//! - Position evaluation
//! - Alpha-beta search and the agents built on it
//! - A turn driver with optional per-agent time budgets

pub mod board;
pub mod error;
pub mod win;
pub mod connectivity;
pub mod eval;
pub mod search;
pub mod agent;
pub mod ai;
pub mod config;
pub mod game;

// Re-exports for convenient access
pub use board::{Board, Coord, Move, DIRECTIONS, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use error::HexError;
pub use win::{has_won, winner};
pub use connectivity::{edge_score, group_score, groups, Group};
pub use eval::{evaluate, terminal_score, Heuristics, WIN_VALUE};
pub use search::SearchEngine;
pub use agent::{build_agent, Agent, AgentKind, RandomAgent};
pub use ai::{AlphaBetaAgent, Decision};
pub use config::{GameConfig, SearchConfig};
pub use game::{Game, GameOutcome, GameResult, Player, Termination};
