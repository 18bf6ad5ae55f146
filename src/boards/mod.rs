//! Implementations of the `Board` trait for the supported games.

/// Jungle (Dou Shou Qi) on a 7x9 board.
pub mod jungle;
/// Reversi (Othello) on an 8x8 board.
pub mod reversi;
