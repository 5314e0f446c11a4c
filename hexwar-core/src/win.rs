//! Connection win detection

use rustc_hash::FxHashSet;

use crate::board::{Board, Coord};
use crate::game::Player;

/// Check if `player` has an unbroken chain between their two goal edges
///
/// Depth-first search from every owned start-edge cell over owned
/// neighbors. The visited set is shared across start cells: a cell already
/// explored from one start cannot reach the far edge from another.
pub fn has_won(board: &Board, player: Player) -> bool {
    let last = board.size() - 1;
    let mut visited: FxHashSet<Coord> = FxHashSet::default();
    let mut stack: Vec<Coord> = Vec::new();

    for start in player.start_edge(board.size()) {
        if board.owner(start) != Some(player) || !visited.insert(start) {
            continue;
        }
        stack.push(start);

        while let Some(current) = stack.pop() {
            if player.goal_axis(current) == last {
                return true;
            }
            for next in board.adjacent(current) {
                if board.owner(next) == Some(player) && visited.insert(next) {
                    stack.push(next);
                }
            }
        }
    }

    false
}

/// The player holding a winning connection, Red checked first
pub fn winner(board: &Board) -> Option<Player> {
    [Player::Red, Player::Blue]
        .into_iter()
        .find(|&p| has_won(board, p))
}
