use tracing::debug;

use crate::board::{Board, Side};
use crate::config::AlphaBetaConfig;
use crate::evaluator::Evaluator;

/// Counters collected during the last search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, root moves included.
    pub nodes: u64,
    /// Sibling lists abandoned because `beta <= alpha`.
    pub cutoffs: u64,
}

/// Depth-limited minimax with optional alpha-beta pruning.
///
/// Successor states are visited through [`Board::explore`], so Jungle searches
/// copies while Reversi applies and undoes moves on one scratch board.
#[derive(Debug, Clone)]
pub struct AlphaBeta<E> {
    evaluator: E,
    config: AlphaBetaConfig,
    stats: SearchStats,
}

impl<E> AlphaBeta<E> {
    pub fn new(evaluator: E, config: AlphaBetaConfig) -> Self {
        Self {
            evaluator,
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Minimax value of `board` for `me`, `me` being the one to move, searched
    /// `config.depth` plies deep. With depth 0 this is the static evaluation.
    pub fn search<B>(&mut self, board: &B, me: Side) -> f64
    where
        B: Board,
        E: Evaluator<B>,
    {
        self.stats = SearchStats::default();
        let mut scratch = board.clone();
        self.search_value(
            &mut scratch,
            me,
            self.config.depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            true,
        )
    }

    /// Scores every shortlisted root move with `config.depth` plies below it and
    /// returns the best one with its score.
    ///
    /// Returns `None` when the game is over or `me` has to pass. Ties go to the
    /// move enumerated first; when every move loses the first one is still
    /// returned.
    pub fn analyze<B>(&mut self, board: &B, me: Side) -> Option<(B::Move, f64)>
    where
        B: Board,
        E: Evaluator<B>,
    {
        self.stats = SearchStats::default();
        if board.is_terminal() {
            return None;
        }

        let moves = self.evaluator.shortlist(board, board.legal_moves(me));
        let mut scratch = board.clone();
        let mut best: Option<(B::Move, f64)> = None;

        for b_move in moves {
            self.stats.nodes += 1;
            let alpha = best.map_or(f64::NEG_INFINITY, |(_, score)| score);
            let depth = self.config.depth;
            let score = scratch.explore(Some(b_move), me, |next| {
                self.search_value(next, me, depth, alpha, f64::INFINITY, false)
            });

            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((b_move, score)),
            }
        }

        if let Some((b_move, score)) = best {
            debug!(
                ?b_move,
                score,
                depth = self.config.depth,
                nodes = self.stats.nodes,
                cutoffs = self.stats.cutoffs,
                "alpha-beta picked a move"
            );
        }
        best
    }

    /// [`AlphaBeta::analyze`] without the score.
    pub fn best_move<B>(&mut self, board: &B, me: Side) -> Option<B::Move>
    where
        B: Board,
        E: Evaluator<B>,
    {
        self.analyze(board, me).map(|(b_move, _)| b_move)
    }

    fn leaf_score<B>(&self, board: &B, me: Side, depth: u32) -> f64
    where
        B: Board,
        E: Evaluator<B>,
    {
        let score = self.evaluator.evaluate(board, me);
        // decided games reached with plies to spare: win sooner, lose later
        if depth > 0 && score.is_finite() && score != 0.0 {
            score + score.signum() * f64::from(depth)
        } else {
            score
        }
    }

    fn search_value<B>(
        &mut self,
        board: &mut B,
        me: Side,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64
    where
        B: Board,
        E: Evaluator<B>,
    {
        self.stats.nodes += 1;
        if depth == 0 || board.is_terminal() {
            return self.leaf_score(board, me, depth);
        }

        let player = if maximizing { me } else { me.opponent() };
        let moves = board.legal_moves(player);

        if moves.is_empty() {
            return board.explore(None, player, |next| {
                self.search_value(next, me, depth - 1, alpha, beta, !maximizing)
            });
        }

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for b_move in moves {
            let score = board.explore(Some(b_move), player, |next| {
                self.search_value(next, me, depth - 1, alpha, beta, !maximizing)
            });

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if self.config.pruning && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use crate::alpha_beta::AlphaBeta;
    use crate::board::{Board, Position, Side};
    use crate::boards::jungle::{JungleBoard, JungleMove};
    use crate::boards::reversi::ReversiBoard;
    use crate::config::AlphaBetaConfig;
    use crate::evaluator::{Evaluator, JungleEvaluator, ReversiEvaluator};
    use crate::random::{CustomNumberGenerator, RandomGenerator};

    fn midgame() -> ReversiBoard {
        let mut board = ReversiBoard::default();
        board.perform_move(Some(Position::new(3, 2)), Side::First);
        board.perform_move(Some(Position::new(2, 2)), Side::Second);
        board.perform_move(Some(Position::new(2, 3)), Side::First);
        board
    }

    fn jmv(x0: i32, y0: i32, x1: i32, y1: i32) -> JungleMove {
        JungleMove::new(Position::new(x0, y0), Position::new(x1, y1))
    }

    /// Plain minimax over copies, with the same pass rule and depth bonus.
    fn minimax<B, E>(evaluator: &E, board: &B, me: Side, depth: u32, maximizing: bool) -> f64
    where
        B: Board,
        E: Evaluator<B>,
    {
        if depth == 0 || board.is_terminal() {
            let score = evaluator.evaluate(board, me);
            return if depth > 0 && score.is_finite() && score != 0.0 {
                score + score.signum() * f64::from(depth)
            } else {
                score
            };
        }

        let player = if maximizing { me } else { me.opponent() };
        let moves = board.legal_moves(player);
        if moves.is_empty() {
            let mut next = board.clone();
            next.perform_move(None, player);
            return minimax(evaluator, &next, me, depth - 1, !maximizing);
        }

        let scores = moves.into_iter().map(|b_move| {
            let mut next = board.clone();
            next.perform_move(Some(b_move), player);
            minimax(evaluator, &next, me, depth - 1, !maximizing)
        });
        if maximizing {
            scores.fold(f64::NEG_INFINITY, f64::max)
        } else {
            scores.fold(f64::INFINITY, f64::min)
        }
    }

    /// Positions met along a random game, one every `every` plies.
    fn random_positions<B: Board>(seed: i64, plies: u32, every: u32) -> Vec<(B, Side)> {
        let mut random = CustomNumberGenerator::new(seed);
        let mut board = B::default();
        let mut player = Side::First;
        let mut positions = Vec::new();

        for ply in 0..plies {
            if board.is_terminal() {
                break;
            }
            if ply % every == 0 {
                positions.push((board.clone(), player));
            }
            let b_move = random.choose(&board.legal_moves(player)).copied();
            board.perform_move(b_move, player);
            player = player.opponent();
        }

        positions
    }

    fn assert_matches_minimax<B, E>(evaluator: E, positions: &[(B, Side)], max_depth: u32)
    where
        B: Board,
        E: Evaluator<B> + Clone,
    {
        for (board, me) in positions {
            for depth in 0..=max_depth {
                let config = AlphaBetaConfig::default().with_depth(depth);
                let mut pruned = AlphaBeta::new(evaluator.clone(), config);
                let mut plain = AlphaBeta::new(evaluator.clone(), config.with_pruning(false));
                let expected = minimax(&evaluator, board, *me, depth, true);

                assert_eq!(pruned.search(board, *me), expected, "depth {depth} for {me:?}");
                assert_eq!(plain.search(board, *me), expected, "depth {depth} for {me:?}");
            }
        }
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let board = midgame();
        let evaluator = ReversiEvaluator::default();
        let mut search = AlphaBeta::new(evaluator, AlphaBetaConfig::default().with_depth(0));

        let value = search.search(&board, Side::Second);

        assert_eq!(value, evaluator.evaluate(&board, Side::Second));
        assert_eq!(search.stats().nodes, 1);
    }

    #[test]
    fn pruning_keeps_the_result() {
        let board = midgame();
        let config = AlphaBetaConfig::default().with_depth(3);
        let mut pruned = AlphaBeta::new(ReversiEvaluator::new(false), config);
        let mut plain = AlphaBeta::new(ReversiEvaluator::new(false), config.with_pruning(false));

        assert_eq!(pruned.search(&board, Side::Second), plain.search(&board, Side::Second));

        let with_pruning = pruned.analyze(&board, Side::Second);
        let without_pruning = plain.analyze(&board, Side::Second);

        assert!(with_pruning.is_some());
        assert_eq!(with_pruning, without_pruning);
        assert!(pruned.stats().cutoffs > 0);
        assert_eq!(plain.stats().cutoffs, 0);
        assert!(pruned.stats().nodes < plain.stats().nodes);
    }

    #[test]
    fn passes_inside_the_tree_hand_the_turn_over() {
        // one capture leaves the second player without discs, then both pass
        let board = ReversiBoard::from_layout(
            "XO...... ........ ........ ........ ........ ........ ........ ........",
        )
        .unwrap();
        let evaluator = ReversiEvaluator::default();

        assert_matches_minimax(evaluator, &[(board.clone(), Side::First)], 4);

        let mut search = AlphaBeta::new(evaluator, AlphaBetaConfig::default().with_depth(3));
        assert_eq!(search.search(&board, Side::First), 30_000.0);
        assert_eq!(search.analyze(&board, Side::First), Some((Position::new(2, 0), 30_001.0)));
    }

    #[test]
    fn reversi_search_agrees_with_minimax() {
        for seed in [1, 7, 42] {
            let positions = random_positions::<ReversiBoard>(seed, 60, 10);
            assert_matches_minimax(ReversiEvaluator::new(false), &positions, 3);
        }
    }

    #[test]
    fn jungle_search_agrees_with_minimax() {
        for seed in [3, 11] {
            let positions = random_positions::<JungleBoard>(seed, 40, 8);
            assert_matches_minimax(JungleEvaluator, &positions, 2);
        }
    }

    #[test]
    fn search_leaves_board_untouched() {
        let board = midgame();
        let before = board.clone();
        let mut search = AlphaBeta::new(ReversiEvaluator::default(), AlphaBetaConfig::default());

        let b_move = search.best_move(&board, Side::Second);

        assert!(b_move.is_some_and(|pos| board.legal_moves(Side::Second).contains(&pos)));
        assert_eq!(board, before);
    }

    #[test]
    fn finished_game_has_no_move() {
        let board = ReversiBoard::from_layout(
            "XXXXXOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO",
        )
        .unwrap();
        let mut search = AlphaBeta::new(ReversiEvaluator::default(), AlphaBetaConfig::default());

        assert_eq!(search.analyze(&board, Side::First), None);
        // two plies to spare on a won board
        assert_eq!(search.search(&board, Side::First), 20_002.0);
        assert_eq!(search.search(&board, Side::Second), -20_002.0);
    }

    #[test]
    fn takes_the_corner_when_offered() {
        let board = ReversiBoard::from_layout(
            "........ .O...... ..X..... ...OX... ...XO... ........ ........ ........",
        )
        .unwrap();
        let mut search = AlphaBeta::new(ReversiEvaluator::default(), AlphaBetaConfig::default());

        assert_eq!(search.best_move(&board, Side::First), Some(Position::new(0, 0)));
    }

    #[test]
    fn jungle_enters_the_den() {
        let board = JungleBoard::from_layout(
            "....... ...d... ....... ....... ....... ....... ....... ....... ......E",
        )
        .unwrap();
        let mut search = AlphaBeta::new(JungleEvaluator, AlphaBetaConfig::default());

        let (b_move, score) = search.analyze(&board, Side::First).unwrap();

        assert_eq!(b_move, jmv(3, 1, 3, 0));
        assert_eq!(score, f64::INFINITY);
    }

    #[test]
    fn lost_position_still_yields_a_move() {
        let board = JungleBoard::from_layout(
            "r...... ....... ....... ....... ....... ....... ....... ...D... .......",
        )
        .unwrap();
        let mut search = AlphaBeta::new(JungleEvaluator, AlphaBetaConfig::default());

        let (b_move, score) = search.analyze(&board, Side::First).unwrap();

        assert_eq!(b_move, jmv(0, 0, 0, 1));
        assert_eq!(score, f64::NEG_INFINITY);
    }
}
