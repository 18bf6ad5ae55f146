use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while parsing a textual board layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("expected {expected} rows but got {actual}")]
    RowCount { expected: usize, actual: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown cell '{symbol}' at ({x}, {y})")]
    UnknownSymbol { symbol: char, x: usize, y: usize },

    #[error("species '{symbol}' appears twice for the same player")]
    DuplicatePiece { symbol: char },
}

/// Errors raised while decoding an inbound protocol line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty command line")]
    EmptyLine,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} expects {expected} coordinates, got {actual}")]
    Arity {
        command: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid coordinate: {0}")]
    BadNumber(#[from] ParseIntError),

    #[error("coordinates {0:?} are off the board")]
    OffBoard(Vec<i32>),
}

/// Errors raised when the live game refuses an operation.
///
/// The agent's state is left untouched whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("illegal move {0} for the side to move")]
    IllegalMove(String),

    #[error("pass is only allowed when no move is available")]
    IllegalPass,

    #[error("the game is already over")]
    GameOver,
}

/// Errors that end a protocol session.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
