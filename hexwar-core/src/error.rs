//! Error types for board and game operations

use crate::board::{Coord, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::game::Player;

/// Errors raised by the core when a caller breaks a board or game contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("coordinate {coord} is outside a {size}x{size} board")]
    OutOfBounds { coord: Coord, size: u8 },

    #[error("illegal move: cell {0} is already occupied")]
    IllegalMove(Coord),

    #[error("no legal moves remain on the board")]
    NoLegalMoves,

    #[error("invalid board size {0} (supported {}..={})", MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
    InvalidBoardSize(u8),

    #[error("game is already over")]
    GameOver,

    #[error("agent seated as {seat:?} plays {player:?} on a {size}x{size} board, game board is {expected_size}x{expected_size}")]
    AgentMismatch {
        seat: Player,
        player: Player,
        size: u8,
        expected_size: u8,
    },

    #[error("game was aborted by an earlier failed turn")]
    GameAborted,
}

pub type Result<T> = std::result::Result<T, HexError>;
