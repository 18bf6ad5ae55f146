//! Engines for two perfect-information board games, Jungle (Dou Shou Qi) and Reversi.
//!
//! Both games implement the [`board::Board`] trait. On top of it sit two search
//! engines: a depth-limited alpha-beta search driven by a per-game
//! [`evaluator::Evaluator`], and a Monte Carlo tree search with UCT selection and
//! random rollouts. An [`agent::Agent`] binds a live board to one of them, and
//! [`driver::run_session`] connects an agent to the `UGO`/`HEDID` line protocol.
//!
//! # Example
//!
//! ```rust
//! use duel_engines::board::{Board, Side};
//! use duel_engines::boards::reversi::ReversiBoard;
//! use duel_engines::config::MctsConfig;
//! use duel_engines::mcts::MonteCarloTreeSearch;
//! use duel_engines::random::CustomNumberGenerator;
//!
//! // Create a new Reversi board
//! let board = ReversiBoard::default();
//!
//! // Create and configure a new MCTS search instance using the builder
//! let mut mcts = MonteCarloTreeSearch::builder(board.clone(), Side::First)
//!     .with_random_generator(CustomNumberGenerator::default())
//!     .with_config(MctsConfig::default().with_rollouts(300))
//!     .build();
//!
//! // Run the search and take the most visited move
//! let best_move = mcts.run().unwrap();
//! assert!(board.legal_moves(Side::First).contains(&best_move));
//!
//! println!("The best move is: {:?}", best_move);
//! ```

/// Runs a search on behalf of one side of a live game.
pub mod agent;
/// Depth-limited minimax with alpha-beta pruning.
pub mod alpha_beta;
/// Contains the `Board` trait and the types shared by all games.
pub mod board;
/// Jungle and Reversi implementations of the `Board` trait.
pub mod boards;
/// Search parameters.
pub mod config;
/// The session loop behind the line protocol.
pub mod driver;
/// Error types.
pub mod error;
/// Static position heuristics.
pub mod evaluator;
/// The `MonteCarloTreeSearch` implementation.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// Wire format of the line protocol.
pub mod protocol;
/// Contains traits and implementations for random number generation.
pub mod random;
