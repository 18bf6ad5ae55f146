use tracing::{debug, info, warn};

use crate::alpha_beta::AlphaBeta;
use crate::board::{Board, Side};
use crate::config::MctsConfig;
use crate::error::AgentError;
use crate::evaluator::Evaluator;
use crate::mcts::MonteCarloTreeSearch;
use crate::random::RandomGenerator;

/// Picks a move for `player` on `board`. `None` means no move is available.
pub trait Strategy<B: Board> {
    fn choose_move(&mut self, board: &B, player: Side) -> Option<B::Move>;
}

impl<B, E> Strategy<B> for AlphaBeta<E>
where
    B: Board,
    E: Evaluator<B>,
{
    fn choose_move(&mut self, board: &B, player: Side) -> Option<B::Move> {
        self.best_move(board, player)
    }
}

/// Builds a fresh search tree for every move and spends the configured rollouts on it.
pub struct MctsStrategy<K: RandomGenerator> {
    config: MctsConfig,
    random: K,
}

impl<K: RandomGenerator> MctsStrategy<K> {
    pub fn new(config: MctsConfig, random: K) -> Self {
        Self { config, random }
    }
}

impl<B: Board, K: RandomGenerator> Strategy<B> for MctsStrategy<K> {
    fn choose_move(&mut self, board: &B, player: Side) -> Option<B::Move> {
        if board.is_terminal() {
            return None;
        }
        MonteCarloTreeSearch::new(board.clone(), player, &mut self.random, self.config).run()
    }
}

/// Plays a uniformly random legal move.
pub struct RandomStrategy<K: RandomGenerator> {
    random: K,
}

impl<K: RandomGenerator> RandomStrategy<K> {
    pub fn new(random: K) -> Self {
        Self { random }
    }
}

impl<B: Board, K: RandomGenerator> Strategy<B> for RandomStrategy<K> {
    fn choose_move(&mut self, board: &B, player: Side) -> Option<B::Move> {
        if board.is_terminal() {
            return None;
        }
        self.random.choose(&board.legal_moves(player)).copied()
    }
}

/// What [`Agent::play`] did: the move applied for the agent (`None` for a pass)
/// and whether the game is over afterwards.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Played<M> {
    pub action: Option<M>,
    pub finished: bool,
}

/// One side of a game: the live board, the side played and the strategy used to move.
pub struct Agent<B: Board, S> {
    board: B,
    me: Side,
    strategy: S,
}

impl<B: Board, S: Strategy<B>> Agent<B, S> {
    /// An agent playing the second side from the starting layout.
    pub fn new(strategy: S) -> Self {
        Self::from_board(B::default(), Side::Second, strategy)
    }

    /// An agent taking over `board` as `me`.
    pub fn from_board(board: B, me: Side, strategy: S) -> Self {
        Self {
            board,
            me,
            strategy,
        }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn me(&self) -> Side {
        self.me
    }

    /// Starts a new game from the starting layout, playing `me`.
    pub fn reset(&mut self, me: Side) {
        self.board = B::default();
        self.me = me;
        info!(side = ?me, "agent reset");
    }

    /// Switches the side played, keeping the current board.
    pub fn set_side(&mut self, me: Side) {
        self.me = me;
        info!(side = ?me, "agent switched sides");
    }

    /// Applies the opponent's move, `None` being a pass. Returns whether the game
    /// is over afterwards.
    ///
    /// Moves that are not legal for the opponent, passes while the opponent has a
    /// move, and anything after the end of the game are rejected without touching
    /// the board.
    pub fn register(&mut self, b_move: Option<B::Move>) -> Result<bool, AgentError> {
        if self.board.is_terminal() {
            warn!(?b_move, "move received after the game ended");
            return Err(AgentError::GameOver);
        }

        let opponent = self.me.opponent();
        let legal = self.board.legal_moves(opponent);
        match b_move {
            Some(m) if !legal.contains(&m) => {
                warn!(b_move = ?m, "rejected illegal move");
                return Err(AgentError::IllegalMove(format!("{m:?}")));
            }
            None if !legal.is_empty() => {
                warn!(available = legal.len(), "rejected pass");
                return Err(AgentError::IllegalPass);
            }
            _ => {}
        }

        self.board.perform_move(b_move, opponent);
        Ok(self.board.is_terminal())
    }

    /// Searches a move for the agent's side and applies it to the live board.
    ///
    /// On a finished game nothing is applied and a pass with `finished` set is
    /// reported.
    pub fn play(&mut self) -> Played<B::Move> {
        if self.board.is_terminal() {
            return Played {
                action: None,
                finished: true,
            };
        }

        let mut action = self.strategy.choose_move(&self.board, self.me);
        if action.is_none() {
            // nothing from the strategy: first legal move, or a pass when there is none
            action = self.board.legal_moves(self.me).first().copied();
        }

        self.board.perform_move(action, self.me);
        let finished = self.board.is_terminal();
        debug!(side = ?self.me, ?action, finished, "agent played");

        Played { action, finished }
    }
}
