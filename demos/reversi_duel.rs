extern crate duel_engines;

use duel_engines::agent::{Agent, MctsStrategy, Played, Strategy};
use duel_engines::alpha_beta::AlphaBeta;
use duel_engines::board::{Board, Position, Side};
use duel_engines::boards::reversi::ReversiBoard;
use duel_engines::config::{AlphaBetaConfig, MctsConfig};
use duel_engines::evaluator::ReversiEvaluator;
use duel_engines::random::CustomNumberGenerator;

fn main() {
    // Alpha-beta opens, MCTS answers
    let mut first: Agent<ReversiBoard, _> = Agent::new(AlphaBeta::new(
        ReversiEvaluator::default(),
        AlphaBetaConfig::default(),
    ));
    let mut second: Agent<ReversiBoard, _> = Agent::new(MctsStrategy::new(
        MctsConfig::default().with_rollouts(150),
        CustomNumberGenerator::default(),
    ));
    first.reset(Side::First);
    second.reset(Side::Second);

    let mut turn = 0;
    loop {
        turn += 1;
        let played = if turn % 2 == 1 {
            exchange(&mut first, &mut second)
        } else {
            exchange(&mut second, &mut first)
        };

        match played.action {
            Some(pos) => println!("{turn:>2}: {:?} plays ({}, {})", side(turn), pos.x, pos.y),
            None => println!("{turn:>2}: {:?} passes", side(turn)),
        }

        if played.finished {
            break;
        }
    }

    // Both agents must have followed the same game
    assert_eq!(first.board(), second.board());
    let board = first.board();
    assert!(board.is_terminal());

    println!(
        "Final score: alpha-beta {} - mcts {} ({:?})",
        board.count(Side::First),
        board.count(Side::Second),
        board.get_outcome()
    );
}

fn side(turn: u32) -> Side {
    if turn % 2 == 1 { Side::First } else { Side::Second }
}

/// Lets `active` move and tells `passive` about it.
fn exchange<A, P>(
    active: &mut Agent<ReversiBoard, A>,
    passive: &mut Agent<ReversiBoard, P>,
) -> Played<Position>
where
    A: Strategy<ReversiBoard>,
    P: Strategy<ReversiBoard>,
{
    let played = active.play();
    let finished = passive
        .register(played.action)
        .expect("both agents share the same rules");
    assert_eq!(finished, played.finished);
    played
}
