//! Players, results and the turn driver

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::board::{Board, Coord, Move};
use crate::config::GameConfig;
use crate::error::{HexError, Result};
use crate::win::winner;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color
///
/// Red connects column 0 to column N-1, Blue connects row 0 to row N-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red = 1,
    Blue = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Identity used by renderers and result reports (1 or 2)
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Player::Red),
            2 => Some(Player::Blue),
            _ => None,
        }
    }

    /// Coordinate along this player's connection axis
    pub fn goal_axis(self, coord: Coord) -> u8 {
        match self {
            Player::Red => coord.col,
            Player::Blue => coord.row,
        }
    }

    /// Cells of the edge where this player's chains start (axis = 0)
    pub fn start_edge(self, size: u8) -> impl Iterator<Item = Coord> {
        (0..size).map(move |k| match self {
            Player::Red => Coord::new(0, k),
            Player::Blue => Coord::new(k, 0),
        })
    }

    fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Blue => 1,
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    RedWins,
    BlueWins,
}

impl GameResult {
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::Red => GameResult::RedWins,
            Player::Blue => GameResult::BlueWins,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Ongoing => None,
            GameResult::RedWins => Some(Player::Red),
            GameResult::BlueWins => Some(Player::Blue),
        }
    }

    /// 0 while ongoing, otherwise the winner's identity
    pub fn winner_number(self) -> u8 {
        self.winner().map_or(0, Player::number)
    }
}

/// How a finished game was decided
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The winner connected their edges
    Connection,
    /// The loser exceeded their cumulative time budget
    Timeout,
}

/// Summary of a completed game
#[derive(Clone, Debug)]
pub struct GameOutcome {
    pub result: GameResult,
    pub termination: Option<Termination>,
    pub moves: Vec<Move>,
    /// Thinking time used by Red and Blue
    pub elapsed: [Duration; 2],
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Player> {
        self.result.winner()
    }
}

// ============================================================================
// GAME (TURN DRIVER)
// ============================================================================

/// Authoritative board plus the two agents taking turns on it
pub struct Game {
    board: Board,
    /// Indexed by `Player::index`: Red first
    agents: [Box<dyn Agent>; 2],
    current: Player,
    result: GameResult,
    termination: Option<Termination>,
    moves: Vec<Move>,
    elapsed: [Duration; 2],
    time_budget: Option<Duration>,
    /// Set once a turn fails; the agents' boards can no longer be trusted
    aborted: bool,
}

impl Game {
    /// New game with Red to move
    ///
    /// Each agent must play the side it is seated on and track a board of the
    /// configured size.
    pub fn new(config: &GameConfig, red: Box<dyn Agent>, blue: Box<dyn Agent>) -> Result<Self> {
        let board = Board::new(config.size)?;
        for (seat, agent) in [(Player::Red, &red), (Player::Blue, &blue)] {
            let size = agent.board().size();
            if agent.player() != seat || size != config.size {
                return Err(HexError::AgentMismatch {
                    seat,
                    player: agent.player(),
                    size,
                    expected_size: config.size,
                });
            }
        }
        Ok(Self {
            board,
            agents: [red, blue],
            current: Player::Red,
            result: GameResult::Ongoing,
            termination: None,
            moves: Vec::new(),
            elapsed: [Duration::ZERO; 2],
            time_budget: config.time_budget,
            aborted: false,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// 0 = none, 1 = Red, 2 = Blue
    pub fn winner_number(&self) -> u8 {
        self.result.winner_number()
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn agent(&self, player: Player) -> &dyn Agent {
        self.agents[player.index()].as_ref()
    }

    /// Cumulative thinking time of `player`'s agent
    pub fn elapsed(&self, player: Player) -> Duration {
        self.elapsed[player.index()]
    }

    /// Play one turn; returns the move applied, or None on a timeout forfeit
    ///
    /// Any error aborts the game: later calls return `GameAborted`.
    pub fn step(&mut self) -> Result<Option<Move>> {
        if self.aborted {
            return Err(HexError::GameAborted);
        }
        if self.result != GameResult::Ongoing {
            return Err(HexError::GameOver);
        }

        let turn = self.play_turn();
        if turn.is_err() {
            self.aborted = true;
        }
        turn
    }

    fn play_turn(&mut self) -> Result<Option<Move>> {
        let mover = self.current;
        let start = Instant::now();
        let mv = self.agents[mover.index()].choose_move()?;
        self.elapsed[mover.index()] += start.elapsed();

        if let Some(budget) = self.time_budget {
            if self.elapsed[mover.index()] > budget {
                tracing::warn!(
                    player = ?mover,
                    elapsed = ?self.elapsed[mover.index()],
                    ?budget,
                    "time budget exceeded, game forfeited"
                );
                self.finish(GameResult::win_for(mover.opponent()), Termination::Timeout);
                return Ok(None);
            }
        }

        // Validate and report before touching the authoritative board
        if self.board.get(mv)?.is_some() {
            return Err(HexError::IllegalMove(mv));
        }
        self.agents[mover.opponent().index()].report_opponent_move(mv)?;
        self.board.set(mover, mv)?;
        self.moves.push(mv);
        self.current = mover.opponent();
        tracing::debug!(player = ?mover, %mv, ply = self.moves.len(), "move applied");

        if let Some(player) = winner(&self.board) {
            self.finish(GameResult::win_for(player), Termination::Connection);
        }

        Ok(Some(mv))
    }

    /// Step until the game is decided
    pub fn play_to_end(mut self) -> Result<GameOutcome> {
        while self.result == GameResult::Ongoing {
            self.step()?;
        }
        Ok(GameOutcome {
            result: self.result,
            termination: self.termination,
            moves: self.moves,
            elapsed: self.elapsed,
        })
    }

    fn finish(&mut self, result: GameResult, termination: Termination) {
        self.result = result;
        self.termination = Some(termination);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RandomAgent;
    use crate::ai::AlphaBetaAgent;
    use crate::config::SearchConfig;

    /// Replays a fixed list of moves, sleeping before each one
    struct ScriptedAgent {
        board: Board,
        player: Player,
        script: Vec<Move>,
        delay: Duration,
    }

    impl ScriptedAgent {
        fn new(size: u8, player: Player, script: &[(u8, u8)]) -> Self {
            Self {
                board: Board::new(size).unwrap(),
                player,
                script: script.iter().rev().map(|&(c, r)| Coord::new(c, r)).collect(),
                delay: Duration::ZERO,
            }
        }
    }

    impl Agent for ScriptedAgent {
        fn name(&self) -> &str {
            "Scripted"
        }

        fn player(&self) -> Player {
            self.player
        }

        fn board(&self) -> &Board {
            &self.board
        }

        fn choose_move(&mut self) -> Result<Move> {
            std::thread::sleep(self.delay);
            let mv = self.script.pop().ok_or(HexError::NoLegalMoves)?;
            self.board.set(self.player, mv)?;
            Ok(mv)
        }

        fn report_opponent_move(&mut self, mv: Move) -> Result<()> {
            self.board.set(self.player.opponent(), mv)
        }
    }

    #[test]
    fn test_player_identity() {
        assert_eq!(Player::Red.number(), 1);
        assert_eq!(Player::Blue.number(), 2);
        assert_eq!(Player::from_number(2), Some(Player::Blue));
        assert_eq!(Player::from_number(0), None);
        assert_eq!(Player::Red.opponent(), Player::Blue);
        assert_eq!(GameResult::Ongoing.winner_number(), 0);
        assert_eq!(GameResult::BlueWins.winner_number(), 2);
    }

    #[test]
    fn test_start_edges() {
        let red: Vec<_> = Player::Red.start_edge(3).collect();
        let blue: Vec<_> = Player::Blue.start_edge(3).collect();
        assert_eq!(red, vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]);
        assert_eq!(blue, vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]);
    }

    #[test]
    fn test_scripted_game_red_connects() {
        let red = ScriptedAgent::new(3, Player::Red, &[(0, 1), (1, 1), (2, 1)]);
        let blue = ScriptedAgent::new(3, Player::Blue, &[(0, 0), (1, 0)]);
        let game = Game::new(&GameConfig::new(3), Box::new(red), Box::new(blue)).unwrap();

        let outcome = game.play_to_end().unwrap();
        assert_eq!(outcome.result, GameResult::RedWins);
        assert_eq!(outcome.termination, Some(Termination::Connection));
        assert_eq!(outcome.moves.len(), 5);
        assert_eq!(outcome.winner(), Some(Player::Red));
    }

    #[test]
    fn test_scripted_game_blue_connects() {
        let red = ScriptedAgent::new(3, Player::Red, &[(0, 0), (0, 1), (2, 2)]);
        let blue = ScriptedAgent::new(3, Player::Blue, &[(1, 0), (1, 1), (1, 2)]);
        let game = Game::new(&GameConfig::new(3), Box::new(red), Box::new(blue)).unwrap();

        let outcome = game.play_to_end().unwrap();
        assert_eq!(outcome.result, GameResult::BlueWins);
        assert_eq!(outcome.termination, Some(Termination::Connection));
        assert_eq!(outcome.moves.len(), 6);
    }

    #[test]
    fn test_step_after_game_over() {
        let red = ScriptedAgent::new(2, Player::Red, &[(0, 0), (1, 0)]);
        let blue = ScriptedAgent::new(2, Player::Blue, &[(0, 1)]);
        let mut game = Game::new(&GameConfig::new(2), Box::new(red), Box::new(blue)).unwrap();
        while game.result() == GameResult::Ongoing {
            game.step().unwrap();
        }
        assert_eq!(game.result(), GameResult::RedWins);
        assert_eq!(game.winner_number(), 1);
        assert_eq!(game.step(), Err(HexError::GameOver));
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let red = ScriptedAgent::new(3, Player::Red, &[(1, 1), (0, 0)]);
        // Blue's script claims Red's cell; its own board rejects it first
        let blue = ScriptedAgent::new(3, Player::Blue, &[(1, 1)]);
        let mut game = Game::new(&GameConfig::new(3), Box::new(red), Box::new(blue)).unwrap();
        game.step().unwrap();
        assert_eq!(game.step(), Err(HexError::IllegalMove(Coord::new(1, 1))));
        assert_eq!(game.board().stone_count(), 1);
        assert_eq!(game.step(), Err(HexError::GameAborted));
    }

    #[test]
    fn test_new_rejects_swapped_sides() {
        let red = ScriptedAgent::new(3, Player::Blue, &[]);
        let blue = ScriptedAgent::new(3, Player::Red, &[]);
        let err = Game::new(&GameConfig::new(3), Box::new(red), Box::new(blue)).err();
        assert_eq!(
            err,
            Some(HexError::AgentMismatch {
                seat: Player::Red,
                player: Player::Blue,
                size: 3,
                expected_size: 3,
            })
        );
    }

    #[test]
    fn test_new_rejects_wrong_board_size() {
        let red = AlphaBetaAgent::new(7, Player::Red, SearchConfig::default()).unwrap();
        let blue = RandomAgent::with_seed(3, Player::Blue, 1).unwrap();
        let err = Game::new(&GameConfig::new(7), Box::new(red), Box::new(blue)).err();
        assert_eq!(
            err,
            Some(HexError::AgentMismatch {
                seat: Player::Blue,
                player: Player::Blue,
                size: 3,
                expected_size: 7,
            })
        );
    }

    #[test]
    fn test_failed_report_leaves_board_untouched() {
        let red = ScriptedAgent::new(3, Player::Red, &[(1, 1), (0, 0)]);
        // Blue already believes (1,1) is taken, so the report fails
        let mut blue = ScriptedAgent::new(3, Player::Blue, &[(2, 2)]);
        blue.board.set(Player::Red, Coord::new(1, 1)).unwrap();
        let mut game = Game::new(&GameConfig::new(3), Box::new(red), Box::new(blue)).unwrap();

        assert_eq!(game.step(), Err(HexError::IllegalMove(Coord::new(1, 1))));
        assert!(game.board().is_empty());
        assert!(game.moves().is_empty());
        assert_eq!(game.current_player(), Player::Red);

        assert_eq!(game.step(), Err(HexError::GameAborted));
        assert!(game.board().is_empty());
        assert_eq!(game.result(), GameResult::Ongoing);
    }

    #[test]
    fn test_timeout_forfeits() {
        let mut red = ScriptedAgent::new(3, Player::Red, &[(0, 0), (0, 1)]);
        red.delay = Duration::from_millis(20);
        let blue = ScriptedAgent::new(3, Player::Blue, &[(2, 2)]);
        let config = GameConfig::new(3).with_time_budget(Duration::from_millis(5));
        let mut game = Game::new(&config, Box::new(red), Box::new(blue)).unwrap();

        assert_eq!(game.step(), Ok(None));
        assert_eq!(game.result(), GameResult::BlueWins);
        assert_eq!(game.termination(), Some(Termination::Timeout));
        assert!(game.board().is_empty());
        assert!(game.elapsed(Player::Red) >= Duration::from_millis(20));
    }

    #[test]
    fn test_agents_track_authoritative_board() {
        let red = AlphaBetaAgent::new(4, Player::Red, SearchConfig::default().with_depth(1)).unwrap();
        let blue = RandomAgent::with_seed(4, Player::Blue, 3).unwrap();
        let mut game = Game::new(&GameConfig::new(4), Box::new(red), Box::new(blue)).unwrap();

        while game.result() == GameResult::Ongoing {
            game.step().unwrap();
            assert_eq!(game.agent(Player::Red).board(), game.board());
            assert_eq!(game.agent(Player::Blue).board(), game.board());
        }
        assert_eq!(game.board().stone_count(), game.moves().len());
        assert_eq!(game.termination(), Some(Termination::Connection));
    }
}
