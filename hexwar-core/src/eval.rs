//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::connectivity::{edge_score, group_score};
use crate::game::Player;

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Weight of own group score
    pub group_weight: f32,
    /// Weight of own edge score
    pub edge_weight: f32,
    /// Weight of opponent group score (subtracted)
    pub opponent_group_weight: f32,
    /// Weight of opponent edge score (subtracted)
    pub opponent_edge_weight: f32,
    /// Per open neighbor of a group
    pub open_neighbor_weight: f32,
    /// Per stone on a goal edge
    pub edge_stone_bonus: f32,
    /// Per owned cell on a diagonal run leaving a goal edge
    pub diagonal_bonus: f32,
    /// Diagonal runs are inspected for steps 1..min(N, reach)
    pub diagonal_reach: u8,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            group_weight: 1.0,
            edge_weight: 2.0,
            opponent_group_weight: 1.2,
            opponent_edge_weight: 2.2,
            open_neighbor_weight: 2.0,
            edge_stone_bonus: 10.0,
            diagonal_bonus: 5.0,
            diagonal_reach: 4,
        }
    }
}

/// Base value of a decided position
pub const WIN_VALUE: f32 = 1000.0;

/// Static score of a non-terminal board from `player`'s point of view
pub fn evaluate(board: &Board, player: Player, heuristics: &Heuristics) -> f32 {
    let opponent = player.opponent();

    let own_groups = group_score(board, player, heuristics);
    let own_edges = edge_score(board, player, heuristics);
    let opp_groups = group_score(board, opponent, heuristics);
    let opp_edges = edge_score(board, opponent, heuristics);

    (own_groups * heuristics.group_weight + own_edges * heuristics.edge_weight)
        - (opp_groups * heuristics.opponent_group_weight
            + opp_edges * heuristics.opponent_edge_weight)
}

/// Score of a board already won by `winner`, seen by `player`
///
/// Remaining depth is added so faster wins and slower losses rank higher.
pub fn terminal_score(winner: Player, player: Player, depth: u32) -> f32 {
    if winner == player {
        WIN_VALUE + depth as f32
    } else {
        -WIN_VALUE - depth as f32
    }
}
