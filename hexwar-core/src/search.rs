//! Depth-limited minimax with alpha-beta pruning

use crate::board::{Board, Move};
use crate::config::SearchConfig;
use crate::eval::{evaluate, terminal_score};
use crate::game::Player;
use crate::win::has_won;

// ============================================================================
// SEARCH ENGINE
// ============================================================================

/// Minimax search from the point of view of one player
///
/// Every node works on its own board copy; siblings never share state.
pub struct SearchEngine<'a> {
    config: &'a SearchConfig,
    perspective: Player,
    nodes: u64,
}

impl<'a> SearchEngine<'a> {
    /// Search maximizing for `perspective`
    pub fn new(config: &'a SearchConfig, perspective: Player) -> Self {
        Self {
            config,
            perspective,
            nodes: 0,
        }
    }

    /// Nodes visited since construction
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Best root move and its score, None on a full board
    ///
    /// Every legal move is tried at the root; the branching cap applies
    /// only below it. Alpha is carried across root siblings. Ties keep the
    /// earliest move in scan order.
    pub fn best_move(&mut self, board: &Board) -> Option<(Move, f32)> {
        let moves = board.legal_moves();
        let first = *moves.first()?;

        let mut best_move = None;
        let mut best_value = f32::NEG_INFINITY;
        let mut alpha = f32::NEG_INFINITY;
        let beta = f32::INFINITY;

        for &mv in &moves {
            let mut child = board.clone();
            child.place(self.perspective, mv);
            let value = self.minimax(
                &child,
                self.config.depth,
                alpha,
                beta,
                self.perspective.opponent(),
            );
            if value > best_value {
                best_value = value;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_value);
        }

        Some((best_move.unwrap_or(first), best_value))
    }

    /// Score `board` with `to_move` about to play and `depth` plies left
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        to_move: Player,
    ) -> f32 {
        self.nodes += 1;

        let me = self.perspective;
        let opponent = me.opponent();
        if has_won(board, me) {
            return terminal_score(me, me, depth);
        }
        if has_won(board, opponent) {
            return terminal_score(opponent, me, depth);
        }

        let moves = board.legal_moves();
        if depth == 0 || moves.is_empty() {
            return evaluate(board, me, &self.config.heuristics);
        }

        let maximizing = to_move == me;
        let mut best = if maximizing {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };

        for &mv in moves.iter().take(self.config.branching_cap) {
            let mut child = board.clone();
            child.place(to_move, mv);
            let value = self.minimax(&child, depth - 1, alpha, beta, to_move.opponent());

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::eval::Heuristics;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    /// Plain minimax over the same capped tree, no pruning
    fn exhaustive(
        board: &Board,
        depth: u32,
        to_move: Player,
        me: Player,
        config: &SearchConfig,
        nodes: &mut u64,
    ) -> f32 {
        *nodes += 1;
        if has_won(board, me) {
            return terminal_score(me, me, depth);
        }
        if has_won(board, me.opponent()) {
            return terminal_score(me.opponent(), me, depth);
        }
        let moves = board.legal_moves();
        if depth == 0 || moves.is_empty() {
            return evaluate(board, me, &config.heuristics);
        }
        let values = moves.iter().take(config.branching_cap).map(|&mv| {
            let child = board.with_move(to_move, mv).unwrap();
            exhaustive(&child, depth - 1, to_move.opponent(), me, config, nodes)
        });
        let values: Vec<f32> = values.collect();
        if to_move == me {
            values.into_iter().fold(f32::NEG_INFINITY, f32::max)
        } else {
            values.into_iter().fold(f32::INFINITY, f32::min)
        }
    }

    fn random_board(size: u8, stones: usize, rng: &mut ChaCha8Rng) -> Board {
        let mut board = Board::new(size).unwrap();
        for i in 0..stones {
            let moves = board.legal_moves();
            let mv = *moves.choose(rng).unwrap();
            let player = if i % 2 == 0 { Player::Red } else { Player::Blue };
            board.set(player, mv).unwrap();
        }
        board
    }

    fn threat_board() -> Board {
        // Red needs only (3,0) to connect column 0 to column 3
        let mut board = Board::new(4).unwrap();
        for &(c, r) in &[(0, 0), (1, 0), (2, 0)] {
            board.set(Player::Red, Coord::new(c, r)).unwrap();
        }
        for &(c, r) in &[(1, 2), (2, 2), (0, 3)] {
            board.set(Player::Blue, Coord::new(c, r)).unwrap();
        }
        board
    }

    #[test]
    fn test_pruning_matches_exhaustive_on_3x3() {
        let config = SearchConfig::default();
        let mut board = Board::new(3).unwrap();
        board.set(Player::Red, Coord::new(1, 1)).unwrap();

        for depth in 0..=3 {
            let mut engine = SearchEngine::new(&config, Player::Blue);
            let pruned = engine.minimax(&board, depth, f32::NEG_INFINITY, f32::INFINITY, Player::Blue);
            let mut nodes = 0;
            let full = exhaustive(&board, depth, Player::Blue, Player::Blue, &config, &mut nodes);
            assert_eq!(pruned, full, "depth {}", depth);
            assert!(engine.nodes() <= nodes);
        }
    }

    #[test]
    fn test_pruning_matches_exhaustive_on_random_positions() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = SearchConfig::default().with_depth(3);

        for round in 0..20 {
            let stones = rng.gen_range(0..8);
            let board = random_board(4, stones, &mut rng);
            let to_move = if stones % 2 == 0 { Player::Red } else { Player::Blue };
            for me in [Player::Red, Player::Blue] {
                let mut engine = SearchEngine::new(&config, me);
                let pruned = engine.minimax(&board, 3, f32::NEG_INFINITY, f32::INFINITY, to_move);
                let mut nodes = 0;
                let full = exhaustive(&board, 3, to_move, me, &config, &mut nodes);
                assert_eq!(pruned, full, "round {} perspective {:?}", round, me);
            }
        }
    }

    #[test]
    fn test_root_search_matches_exhaustive() {
        let config = SearchConfig::default().with_depth(2);
        let mut board = Board::new(3).unwrap();
        board.set(Player::Red, Coord::new(0, 1)).unwrap();
        board.set(Player::Blue, Coord::new(1, 1)).unwrap();

        let mut engine = SearchEngine::new(&config, Player::Red);
        let (mv, score) = engine.best_move(&board).unwrap();

        let mut expected: Option<(Coord, f32)> = None;
        for m in board.legal_moves() {
            let child = board.with_move(Player::Red, m).unwrap();
            let mut nodes = 0;
            let v = exhaustive(&child, 2, Player::Blue, Player::Red, &config, &mut nodes);
            if expected.map_or(true, |(_, best)| v > best) {
                expected = Some((m, v));
            }
        }
        assert_eq!(Some((mv, score)), expected);
    }

    #[test]
    fn test_terminal_scores_include_depth() {
        let config = SearchConfig::default();
        let mut board = Board::new(3).unwrap();
        for r in 0..3 {
            board.set(Player::Blue, Coord::new(1, r)).unwrap();
        }
        let mut blue = SearchEngine::new(&config, Player::Blue);
        assert_eq!(blue.minimax(&board, 3, f32::NEG_INFINITY, f32::INFINITY, Player::Red), 1003.0);
        assert_eq!(blue.minimax(&board, 1, f32::NEG_INFINITY, f32::INFINITY, Player::Red), 1001.0);

        let mut red = SearchEngine::new(&config, Player::Red);
        assert_eq!(red.minimax(&board, 2, f32::NEG_INFINITY, f32::INFINITY, Player::Red), -1002.0);
    }

    #[test]
    fn test_prefers_immediate_win_over_slower_win() {
        let config = SearchConfig::default();
        let board = threat_board();
        let mut engine = SearchEngine::new(&config, Player::Red);
        let (mv, score) = engine.best_move(&board).unwrap();
        assert_eq!(mv, Coord::new(3, 0));
        assert_eq!(score, 1000.0 + config.depth as f32);
    }

    #[test]
    fn test_branching_cap_limits_nodes() {
        let board = Board::new(5).unwrap();
        let narrow = SearchConfig::default().with_depth(2).with_branching_cap(2);
        let mut engine = SearchEngine::new(&narrow, Player::Red);
        engine.minimax(&board, 2, f32::NEG_INFINITY, f32::INFINITY, Player::Red);
        // Root + at most 2 children + at most 4 grandchildren
        assert!(engine.nodes() <= 7);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = Board::new(2).unwrap();
        for (i, mv) in board.legal_moves().into_iter().enumerate() {
            let p = if i % 2 == 0 { Player::Red } else { Player::Blue };
            board.set(p, mv).unwrap();
        }
        let config = SearchConfig::default().with_heuristics(Heuristics::default());
        let mut engine = SearchEngine::new(&config, Player::Red);
        assert!(engine.best_move(&board).is_none());
    }
}
