//! Static heuristics used by the alpha-beta search.

use crate::board::{Board, GameOutcome, Position, Side};
use crate::boards::jungle::{JungleBoard, den};
use crate::boards::reversi::{self, ReversiBoard};

/// Scores a position from `player`'s point of view; higher is better for `player`.
pub trait Evaluator<B: Board> {
    fn evaluate(&self, board: &B, player: Side) -> f64;

    /// Narrows the root moves handed to the search. Keeps everything by default.
    fn shortlist(&self, _board: &B, moves: Vec<B::Move>) -> Vec<B::Move> {
        moves
    }
}

const MATERIAL_WEIGHT: i32 = 10;
const DEN_REACH: i32 = 14;
const DEN_WEIGHT: i32 = 3;

/// Material plus a bonus for every piece close to the opponent's den.
#[derive(Debug, Default, Clone, Copy)]
pub struct JungleEvaluator;

impl Evaluator<JungleBoard> for JungleEvaluator {
    fn evaluate(&self, board: &JungleBoard, player: Side) -> f64 {
        match board.get_outcome() {
            GameOutcome::Winner(side) if side == player => return f64::INFINITY,
            GameOutcome::Winner(_) => return f64::NEG_INFINITY,
            _ => {}
        }

        let opponent = player.opponent();
        let target = den(opponent);

        let material: i32 = board.pieces(player).map(|(species, _)| species.value()).sum::<i32>()
            - board.pieces(opponent).map(|(species, _)| species.value()).sum::<i32>();
        let approach: i32 = board
            .pieces(player)
            .map(|(_, pos)| (DEN_REACH - pos.manhattan(target)) * DEN_WEIGHT)
            .sum();

        f64::from(material * MATERIAL_WEIGHT + approach)
    }
}

const TERMINAL_WEIGHT: i32 = 10_000;
const CORNER_WEIGHT: i32 = 50;
const C_SQUARE_WEIGHT: i32 = 35;
const X_SQUARE_WEIGHT: i32 = 45;
const FRONTIER_WEIGHT: i32 = 8;

struct CornerZone {
    corner: Position,
    c_squares: [Position; 2],
    x_square: Position,
}

const CORNER_ZONES: [CornerZone; 4] = [
    CornerZone {
        corner: Position::new(0, 0),
        c_squares: [Position::new(1, 0), Position::new(0, 1)],
        x_square: Position::new(1, 1),
    },
    CornerZone {
        corner: Position::new(7, 0),
        c_squares: [Position::new(6, 0), Position::new(7, 1)],
        x_square: Position::new(6, 1),
    },
    CornerZone {
        corner: Position::new(0, 7),
        c_squares: [Position::new(0, 6), Position::new(1, 7)],
        x_square: Position::new(1, 6),
    },
    CornerZone {
        corner: Position::new(7, 7),
        c_squares: [Position::new(7, 6), Position::new(6, 7)],
        x_square: Position::new(6, 6),
    },
];

/// Corner control, penalties for the squares next to open corners, and frontier
/// exposure. Terminal positions score the disc differential times 10 000.
#[derive(Debug, Clone, Copy)]
pub struct ReversiEvaluator {
    /// Restrict root moves to corners whenever a corner is available.
    pub prefer_corners: bool,
}

impl Default for ReversiEvaluator {
    fn default() -> Self {
        Self {
            prefer_corners: true,
        }
    }
}

impl ReversiEvaluator {
    pub fn new(prefer_corners: bool) -> Self {
        Self { prefer_corners }
    }

    fn ownership(board: &ReversiBoard, pos: Position, player: Side, weight: i32) -> i32 {
        match board.get(pos) {
            Some(side) if side == player => weight,
            Some(_) => -weight,
            None => 0,
        }
    }

    fn corner_score(board: &ReversiBoard, player: Side) -> i32 {
        CORNER_ZONES
            .iter()
            .map(|zone| {
                if board.get(zone.corner).is_some() {
                    return Self::ownership(board, zone.corner, player, CORNER_WEIGHT);
                }
                let c_squares: i32 = zone
                    .c_squares
                    .iter()
                    .map(|pos| Self::ownership(board, *pos, player, -C_SQUARE_WEIGHT))
                    .sum();
                c_squares + Self::ownership(board, zone.x_square, player, -X_SQUARE_WEIGHT)
            })
            .sum()
    }

    fn is_frontier(board: &ReversiBoard, pos: Position) -> bool {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|(dx, dy)| (*dx, *dy) != (0, 0))
            .map(|(dx, dy)| pos.offset(dx, dy))
            .any(|neighbour| board.free_cells().contains(neighbour))
    }

    fn frontier_score(board: &ReversiBoard, player: Side) -> i32 {
        let mut own = 0;
        let mut theirs = 0;
        for y in 0..reversi::SIZE {
            for x in 0..reversi::SIZE {
                let pos = Position::new(x, y);
                match board.get(pos) {
                    Some(side) if Self::is_frontier(board, pos) => {
                        if side == player {
                            own += 1;
                        } else {
                            theirs += 1;
                        }
                    }
                    _ => {}
                }
            }
        }
        -FRONTIER_WEIGHT * (own - theirs)
    }
}

fn is_corner(pos: Position) -> bool {
    CORNER_ZONES.iter().any(|zone| zone.corner == pos)
}

impl Evaluator<ReversiBoard> for ReversiEvaluator {
    fn evaluate(&self, board: &ReversiBoard, player: Side) -> f64 {
        if board.is_terminal() {
            return f64::from(board.disc_difference(player) * TERMINAL_WEIGHT);
        }

        f64::from(Self::corner_score(board, player) + Self::frontier_score(board, player))
    }

    fn shortlist(&self, _board: &ReversiBoard, moves: Vec<Position>) -> Vec<Position> {
        if !self.prefer_corners {
            return moves;
        }

        let corners: Vec<Position> = moves.iter().copied().filter(|pos| is_corner(*pos)).collect();
        if corners.is_empty() { moves } else { corners }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, Position, Side};
    use crate::boards::jungle::{JungleBoard, JungleMove};
    use crate::boards::reversi::ReversiBoard;
    use crate::evaluator::{Evaluator, JungleEvaluator, ReversiEvaluator};

    fn reversi(layout: &str) -> ReversiBoard {
        ReversiBoard::from_layout(layout).unwrap()
    }

    #[test]
    fn jungle_start_is_balanced() {
        let board = JungleBoard::default();

        assert_eq!(JungleEvaluator.evaluate(&board, Side::First), 120.0);
        assert_eq!(JungleEvaluator.evaluate(&board, Side::Second), 120.0);
    }

    #[test]
    fn jungle_material_and_approach() {
        let mut board = JungleBoard::default();
        // first rat steps towards the enemy den
        board.perform_move(
            Some(JungleMove::new(Position::new(6, 6), Position::new(6, 5))),
            Side::First,
        );

        assert_eq!(JungleEvaluator.evaluate(&board, Side::First), 123.0);

        let lopsided = JungleBoard::from_layout(
            "L...... ....... ....... ....... ....... ....... ....... ....... ......e",
        )
        .unwrap();
        // material (10 - 8) * 10, approach (14 - 11) * 3
        assert_eq!(JungleEvaluator.evaluate(&lopsided, Side::First), 29.0);
    }

    #[test]
    fn jungle_decided_games_are_infinite() {
        let board = JungleBoard::from_layout(
            "...d... ....... ....... ....... ....... ....... ....... ....... ......E",
        )
        .unwrap();

        assert_eq!(JungleEvaluator.evaluate(&board, Side::First), f64::INFINITY);
        assert_eq!(JungleEvaluator.evaluate(&board, Side::Second), f64::NEG_INFINITY);
    }

    #[test]
    fn reversi_opening_scores_zero() {
        let board = ReversiBoard::default();

        assert_eq!(ReversiEvaluator::default().evaluate(&board, Side::First), 0.0);
    }

    #[test]
    fn reversi_corner_and_adjacent_squares() {
        let evaluator = ReversiEvaluator::default();
        let corner = reversi(
            "X....... ........ ........ ...OX... ...XO... ........ ........ ........",
        );
        let x_square = reversi(
            "........ .X...... ........ ...OX... ...XO... ........ ........ ........",
        );
        let c_square = reversi(
            ".X...... ........ ........ ...OX... ...XO... ........ ........ ........",
        );

        assert_eq!(evaluator.evaluate(&corner, Side::First), 42.0);
        assert_eq!(evaluator.evaluate(&corner, Side::Second), -42.0);
        assert_eq!(evaluator.evaluate(&x_square, Side::First), -53.0);
        assert_eq!(evaluator.evaluate(&c_square, Side::Second), 43.0);
    }

    #[test]
    fn reversi_terminal_uses_disc_differential() {
        let board = reversi(
            "XXXXXOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO XXXXOOOO",
        );

        assert_eq!(ReversiEvaluator::default().evaluate(&board, Side::First), 20_000.0);
        assert_eq!(ReversiEvaluator::default().evaluate(&board, Side::Second), -20_000.0);
    }

    #[test]
    fn corner_shortlist() {
        let board = ReversiBoard::default();
        let moves = vec![Position::new(2, 0), Position::new(0, 0), Position::new(7, 7)];

        assert_eq!(
            ReversiEvaluator::default().shortlist(&board, moves.clone()),
            vec![Position::new(0, 0), Position::new(7, 7)]
        );
        assert_eq!(ReversiEvaluator::new(false).shortlist(&board, moves.clone()), moves);
        assert_eq!(
            ReversiEvaluator::default().shortlist(&board, vec![Position::new(2, 0)]),
            vec![Position::new(2, 0)]
        );
    }
}
