use crate::board::{Board, GameOutcome, Side};

/// Represents a single node in the Monte Carlo search tree.
///
/// Each node stores the state of the game, statistics about the outcomes of simulations,
/// and the moves that have not been expanded into children yet.
#[derive(Debug, Clone)]
pub struct MctsNode<B: Board> {
    /// The depth of the node in the tree.
    pub height: u32,
    /// The game state that this node represents.
    pub board: Box<B>,
    /// The move that led to this node's state from its parent. `None` for the root node.
    pub prev_move: Option<B::Move>,
    /// The player to move in this node's game state.
    pub player: Side,
    /// The outcome of the game at this node, if it is terminal.
    pub outcome: GameOutcome,
    /// The number of times this node has been visited during the search.
    pub visits: u32,
    /// Rollouts through this node credited as wins, see [`crate::config::Reward`].
    pub wins: u32,
    /// Rollouts through this node that ended in a draw.
    pub draws: u32,
    /// Legal moves of `player` not expanded yet. Empty for terminal states.
    pub untried: Vec<B::Move>,
}

impl<B: Board> MctsNode<B> {
    /// Creates a new unvisited node for `player` to move on `board`.
    pub fn new(board: Box<B>, player: Side) -> Self {
        let outcome = board.get_outcome();
        let untried = if board.is_terminal() {
            Vec::new()
        } else {
            board.legal_moves(player)
        };

        MctsNode {
            height: 0,
            board,
            prev_move: None,
            player,
            outcome,
            visits: 0,
            wins: 0,
            draws: 0,
            untried,
        }
    }

    /// The player whose move led into this node.
    pub fn mover(&self) -> Side {
        self.player.opponent()
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Calculates the win rate of this node.
    pub fn wins_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.visits)
        }
    }

    /// Calculates the draw rate of this node.
    pub fn draws_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.draws) / f64::from(self.visits)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{GameOutcome, Side};
    use crate::boards::reversi::ReversiBoard;
    use crate::mcts_node::MctsNode;

    #[test]
    fn fresh_node_lists_legal_moves() {
        let node = MctsNode::new(Box::new(ReversiBoard::default()), Side::First);

        assert_eq!(node.untried.len(), 4);
        assert_eq!(node.outcome, GameOutcome::InProgress);
        assert_eq!(node.mover(), Side::Second);
        assert!(!node.is_fully_expanded());
        assert_eq!(node.wins_rate(), 0.0);
    }

    #[test]
    fn terminal_node_has_nothing_to_expand() {
        let board = ReversiBoard::from_layout(
            "XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO",
        )
        .unwrap();
        let mut node = MctsNode::new(Box::new(board), Side::Second);
        node.visits = 4;
        node.draws = 1;

        assert!(node.is_fully_expanded());
        assert_eq!(node.outcome, GameOutcome::Draw);
        assert_eq!(node.draws_rate(), 0.25);
    }
}
