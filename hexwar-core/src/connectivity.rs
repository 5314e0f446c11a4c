//! Stone groups and edge patterns used by the evaluator

use rustc_hash::FxHashSet;

use crate::board::{Board, Coord};
use crate::eval::Heuristics;
use crate::game::Player;

/// A maximal set of connected same-player stones
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    /// Stones in flood-fill order, starting from the first stone in scan order
    pub stones: Vec<Coord>,
    /// Distinct empty cells adjacent to any stone of the group
    pub open_neighbors: usize,
}

impl Group {
    pub fn size(&self) -> usize {
        self.stones.len()
    }
}

/// Partition `player`'s stones into connected groups
pub fn groups(board: &Board, player: Player) -> Vec<Group> {
    let mut seen: FxHashSet<Coord> = FxHashSet::default();
    let mut out = Vec::new();

    for start in board.stones(player) {
        if seen.contains(&start) {
            continue;
        }
        let stones = flood_fill(board, start, player);
        seen.extend(stones.iter().copied());
        let open_neighbors = count_open_neighbors(board, &stones);
        out.push(Group { stones, open_neighbors });
    }

    out
}

fn flood_fill(board: &Board, start: Coord, player: Player) -> Vec<Coord> {
    let mut members: FxHashSet<Coord> = FxHashSet::default();
    members.insert(start);
    let mut stones = vec![start];
    let mut frontier = vec![start];

    while let Some(current) = frontier.pop() {
        for next in board.adjacent(current) {
            if board.owner(next) == Some(player) && members.insert(next) {
                stones.push(next);
                frontier.push(next);
            }
        }
    }

    stones
}

fn count_open_neighbors(board: &Board, stones: &[Coord]) -> usize {
    let mut open: FxHashSet<Coord> = FxHashSet::default();
    for &stone in stones {
        open.extend(board.adjacent(stone).filter(|&n| board.owner(n).is_none()));
    }
    open.len()
}

/// Sum over groups of size^2 plus weighted open neighbors
///
/// Squaring favors one large group over several fragments.
pub fn group_score(board: &Board, player: Player, heuristics: &Heuristics) -> f32 {
    groups(board, player)
        .iter()
        .map(|g| {
            let size = g.size() as f32;
            size * size + heuristics.open_neighbor_weight * g.open_neighbors as f32
        })
        .sum()
}

/// Edge presence plus short diagonal runs leaving each goal edge
///
/// Each stone on a goal edge earns `edge_stone_bonus`. From every edge stone
/// the cells `i` steps inward along the diagonal (`1 <= i < min(N, reach)`)
/// earn `diagonal_bonus` when owned by the same player. Red looks from
/// column 0 toward (+i, +i) and from column N-1 toward (-i, +i); Blue looks
/// from row 0 toward (+i, +i) and from row N-1 toward (+i, -i).
pub fn edge_score(board: &Board, player: Player, heuristics: &Heuristics) -> f32 {
    let n = board.size() as i16;
    let last = n - 1;
    let reach = n.min(heuristics.diagonal_reach as i16);
    let owns = |col: i16, row: i16| {
        (0..n).contains(&col)
            && (0..n).contains(&row)
            && board.owner(Coord::new(col as u8, row as u8)) == Some(player)
    };

    let mut edge_stones = 0u32;
    let mut diagonal_steps = 0u32;
    for k in 0..n {
        // (edge cell, inward diagonal step) on both goal edges
        let starts = match player {
            Player::Red => [((0, k), (1, 1)), ((last, k), (-1, 1))],
            Player::Blue => [((k, 0), (1, 1)), ((k, last), (1, -1))],
        };
        for ((col, row), (dc, dr)) in starts {
            if !owns(col, row) {
                continue;
            }
            edge_stones += 1;
            for i in 1..reach {
                if owns(col + dc * i, row + dr * i) {
                    diagonal_steps += 1;
                }
            }
        }
    }

    heuristics.edge_stone_bonus * edge_stones as f32
        + heuristics.diagonal_bonus * diagonal_steps as f32
}
