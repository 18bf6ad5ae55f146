use crate::board::{Board, GameOutcome, Side};
use crate::config::{MctsConfig, Reward};
use crate::mcts_node::MctsNode;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use ego_tree::{NodeId, NodeRef, Tree};
use tracing::{debug, trace};

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It holds the search tree, the random number generator, and the configuration for the search.
/// Nodes live in an arena owned by the tree and refer to each other by [`NodeId`].
pub struct MonteCarloTreeSearch<B: Board, K: RandomGenerator> {
    tree: Tree<MctsNode<B>>,
    random: K,
    config: MctsConfig,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
///
/// This provides a convenient way to configure the MCTS search with different parameters.
pub struct MonteCarloTreeSearchBuilder<B: Board, K: RandomGenerator> {
    board: B,
    player: Side,
    random_generator: K,
    config: MctsConfig,
}

impl<B: Board> MonteCarloTreeSearchBuilder<B, StandardRandomGenerator> {
    /// Creates a new builder searching for `player`, who is to move on `board`.
    pub fn new(board: B, player: Side) -> Self {
        Self {
            board,
            player,
            random_generator: StandardRandomGenerator::default(),
            config: MctsConfig::default(),
        }
    }
}

impl<B: Board, K: RandomGenerator> MonteCarloTreeSearchBuilder<B, K> {
    /// Sets the random number generator for the MCTS search.
    pub fn with_random_generator<R: RandomGenerator>(
        self,
        rg: R,
    ) -> MonteCarloTreeSearchBuilder<B, R> {
        MonteCarloTreeSearchBuilder {
            board: self.board,
            player: self.player,
            random_generator: rg,
            config: self.config,
        }
    }

    /// Sets rollout budget, exploration constant and reward attribution.
    pub fn with_config(mut self, config: MctsConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the `MonteCarloTreeSearch` instance with the configured parameters.
    pub fn build(self) -> MonteCarloTreeSearch<B, K> {
        MonteCarloTreeSearch::new(self.board, self.player, self.random_generator, self.config)
    }
}

impl<B: Board> MonteCarloTreeSearch<B, StandardRandomGenerator> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(
        board: B,
        player: Side,
    ) -> MonteCarloTreeSearchBuilder<B, StandardRandomGenerator> {
        MonteCarloTreeSearchBuilder::new(board, player)
    }
}

impl<B: Board, K: RandomGenerator> MonteCarloTreeSearch<B, K> {
    /// Creates a new `MonteCarloTreeSearch` instance.
    ///
    /// It is recommended to use the builder pattern via `MonteCarloTreeSearch::builder()` instead.
    pub fn new(board: B, player: Side, rg: K, config: MctsConfig) -> Self {
        Self {
            tree: Tree::new(MctsNode::new(Box::new(board), player)),
            random: rg,
            config,
        }
    }

    /// Returns an immutable reference to the underlying search tree.
    pub fn get_tree(&self) -> &Tree<MctsNode<B>> {
        &self.tree
    }

    /// Returns a reference to the root node of the search tree.
    pub fn get_root(&self) -> NodeRef<'_, MctsNode<B>> {
        self.tree.root()
    }

    /// Statistics of the expanded root children, in expansion order.
    pub fn root_children(&self) -> impl Iterator<Item = &MctsNode<B>> + '_ {
        self.get_root().children().map(|child| child.value())
    }

    /// Performs one full iteration of the MCTS algorithm
    /// (Selection, Expansion, Simulation, Backpropagation).
    /// Returns the path of nodes that were updated during backpropagation, leaf first.
    pub fn do_iteration(&mut self) -> Vec<NodeId> {
        let selected = self.select();
        let expanded = self.expand(selected);
        let outcome = self.simulate(expanded);
        self.backpropagate(expanded, outcome)
    }

    /// Runs the MCTS search for a specified number of iterations.
    pub fn iterate_n_times(&mut self, n: u32) {
        for _ in 0..n {
            self.do_iteration();
        }
    }

    /// Spends the configured rollout budget and returns the most visited root move.
    pub fn run(&mut self) -> Option<B::Move> {
        self.iterate_n_times(self.config.rollouts);

        let best = self.get_most_visited_move();
        if let Some(node) = self.most_visited_child() {
            debug!(
                b_move = ?node.prev_move,
                visits = node.visits,
                win_rate = node.wins_rate(),
                root_visits = self.get_root().value().visits,
                children = self.get_root().children().count(),
                "mcts picked a move"
            );
        }
        best
    }

    /// Returns the move of the root child with the most visits. The first child wins ties.
    /// `None` when the root has no children, i.e. the game is over or the root player passes.
    pub fn get_most_visited_move(&self) -> Option<B::Move> {
        self.most_visited_child().and_then(|node| node.prev_move)
    }

    fn most_visited_child(&self) -> Option<&MctsNode<B>> {
        let mut best: Option<&MctsNode<B>> = None;
        for child in self.root_children() {
            if best.is_none_or(|current| child.visits > current.visits) {
                best = Some(child);
            }
        }
        best
    }

    /// Descends from the root through fully expanded nodes, following the best UCT score.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();
        loop {
            let data = current.value();
            if !data.is_fully_expanded() || !current.has_children() {
                return current.id();
            }

            let mut best: Option<(NodeRef<'_, MctsNode<B>>, f64)> = None;
            for child in current.children() {
                let score = self.uct_value(data.visits, child.value());
                if best.is_none_or(|(_, max)| score > max) {
                    best = Some((child, score));
                }
            }

            match best {
                Some((child, _)) => current = child,
                None => return current.id(),
            }
        }
    }

    /// Attaches a child for one random untried move. Returns the node itself when
    /// nothing is left to try (terminal state or forced pass).
    fn expand(&mut self, node_id: NodeId) -> NodeId {
        let Some(mut node) = self.tree.get_mut(node_id) else {
            return node_id;
        };

        let data = node.value();
        if data.untried.is_empty() {
            return node_id;
        }

        let index = self.random.next_range(0, data.untried.len() as i32) as usize;
        let b_move = data.untried.swap_remove(index);
        let mut board = data.board.clone();
        board.perform_move(Some(b_move), data.player);

        let mut child = MctsNode::new(board, data.player.opponent());
        child.prev_move = Some(b_move);
        child.height = data.height + 1;

        node.append(child).id()
    }

    /// Plays uniformly random moves, passing when forced, until the game ends.
    fn simulate(&mut self, node_id: NodeId) -> GameOutcome {
        let Some(node) = self.tree.get(node_id) else {
            return GameOutcome::Draw;
        };
        let mut board = node.value().board.as_ref().clone();
        let mut player = node.value().player;

        let mut plies = 0u32;
        while !board.is_terminal() {
            let moves = board.legal_moves(player);
            let b_move = self.random.choose(&moves).copied();
            board.perform_move(b_move, player);
            player = player.opponent();
            plies += 1;
        }

        let outcome = board.get_outcome();
        trace!(?outcome, plies, "rollout finished");
        outcome
    }

    /// Propagates the result of a simulation back up the tree, updating node statistics.
    fn backpropagate(&mut self, node_id: NodeId, outcome: GameOutcome) -> Vec<NodeId> {
        let root_player = self.tree.root().value().player;
        let reward = self.config.reward;
        let mut branch = Vec::new();
        let mut current = Some(node_id);

        while let Some(id) = current {
            let Some(mut node) = self.tree.get_mut(id) else {
                break;
            };

            let data = node.value();
            let credited = match reward {
                Reward::Mover => data.mover(),
                Reward::Root => root_player,
            };

            data.visits += 1;
            match outcome {
                GameOutcome::Winner(winner) if winner == credited => data.wins += 1,
                GameOutcome::Draw => data.draws += 1,
                _ => {}
            }

            branch.push(id);
            current = node.parent().map(|parent| parent.id());
        }

        branch
    }

    /// Calculates the UCT value of `child`. Unvisited children come first.
    fn uct_value(&self, parent_visits: u32, child: &MctsNode<B>) -> f64 {
        if child.visits == 0 {
            return f64::INFINITY;
        }

        let visits = f64::from(child.visits);
        f64::from(child.wins) / visits
            + self.config.exploration * (f64::from(parent_visits).ln() / visits).sqrt()
    }
}
