//! The line protocol spoken with the opponent.
//!
//! Inbound: `UGO`, `HEDID <coords>` (optionally preceded by two clock values),
//! `ONEMORE`, `BYE`. Outbound: `RDY` and `IDO <coords>`. A pass is written with
//! every coordinate set to `-1`.

use std::fmt;

use crate::board::Position;
use crate::boards::{jungle, reversi};
use crate::boards::jungle::JungleMove;
use crate::error::ProtocolError;

const PASS: i32 = -1;

/// A move that travels over the wire as a fixed number of integers.
pub trait WireMove: Sized {
    /// Number of coordinates per move.
    const ARITY: usize;

    /// Decodes `ARITY` coordinates. `None` when they do not name a cell pair on the board.
    fn from_coords(coords: &[i32]) -> Option<Self>;

    fn to_coords(&self) -> Vec<i32>;
}

/// Reversi moves are the placed cell, `x y`.
impl WireMove for Position {
    const ARITY: usize = 2;

    fn from_coords(coords: &[i32]) -> Option<Self> {
        let &[x, y] = coords else {
            return None;
        };
        let pos = Position::new(x, y);
        reversi::in_bounds(pos).then_some(pos)
    }

    fn to_coords(&self) -> Vec<i32> {
        vec![self.x, self.y]
    }
}

/// Jungle moves are `x0 y0 x1 y1`.
impl WireMove for JungleMove {
    const ARITY: usize = 4;

    fn from_coords(coords: &[i32]) -> Option<Self> {
        let &[x0, y0, x1, y1] = coords else {
            return None;
        };
        let from = Position::new(x0, y0);
        let to = Position::new(x1, y1);
        (jungle::in_bounds(from) && jungle::in_bounds(to)).then_some(JungleMove::new(from, to))
    }

    fn to_coords(&self) -> Vec<i32> {
        vec![self.from.x, self.from.y, self.to.x, self.to.y]
    }
}

/// A decoded inbound line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command<M> {
    /// The engine moves first.
    Ugo,
    /// The opponent's move, `None` for a pass.
    HeDid(Option<M>),
    /// Start a new game.
    OneMore,
    /// End the session.
    Bye,
}

impl<M: WireMove> Command<M> {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Err(ProtocolError::EmptyLine);
        };

        match name {
            "UGO" => Ok(Command::Ugo),
            "ONEMORE" => Ok(Command::OneMore),
            "BYE" => Ok(Command::Bye),
            "HEDID" => {
                let args: Vec<&str> = tokens.collect();
                let coords = if args.len() == M::ARITY {
                    &args[..]
                } else if args.len() == M::ARITY + 2 {
                    // leading clock values
                    &args[2..]
                } else {
                    return Err(ProtocolError::Arity {
                        command: "HEDID",
                        expected: M::ARITY,
                        actual: args.len(),
                    });
                };
                decode_move(coords).map(Command::HeDid)
            }
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

fn decode_move<M: WireMove>(tokens: &[&str]) -> Result<Option<M>, ProtocolError> {
    let coords = tokens
        .iter()
        .map(|token| token.parse::<i32>())
        .collect::<Result<Vec<i32>, _>>()?;

    if coords.iter().all(|c| *c == PASS) {
        return Ok(None);
    }

    M::from_coords(&coords)
        .map(Some)
        .ok_or(ProtocolError::OffBoard(coords))
}

/// An outbound line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Reply<M> {
    Ready,
    IDo(Option<M>),
}

impl<M: WireMove> fmt::Display for Reply<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ready => write!(f, "RDY"),
            Reply::IDo(b_move) => {
                let coords = match b_move {
                    Some(m) => m.to_coords(),
                    None => vec![PASS; M::ARITY],
                };
                write!(f, "IDO")?;
                for c in coords {
                    write!(f, " {c}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Position;
    use crate::boards::jungle::JungleMove;
    use crate::error::ProtocolError;
    use crate::protocol::{Command, Reply};

    fn jmv(x0: i32, y0: i32, x1: i32, y1: i32) -> JungleMove {
        JungleMove::new(Position::new(x0, y0), Position::new(x1, y1))
    }

    #[test]
    fn parses_control_commands() {
        assert_eq!(Command::<Position>::parse("UGO"), Ok(Command::Ugo));
        assert_eq!(Command::<Position>::parse("UGO 60.0 60.0"), Ok(Command::Ugo));
        assert_eq!(Command::<Position>::parse("  ONEMORE\n"), Ok(Command::OneMore));
        assert_eq!(Command::<JungleMove>::parse("BYE"), Ok(Command::Bye));
    }

    #[test]
    fn parses_moves_with_and_without_clocks() {
        assert_eq!(
            Command::parse("HEDID 3 2"),
            Ok(Command::HeDid(Some(Position::new(3, 2))))
        );
        assert_eq!(
            Command::parse("HEDID 0.5 12 3 2"),
            Ok(Command::HeDid(Some(Position::new(3, 2))))
        );
        assert_eq!(
            Command::parse("HEDID 6 6 6 5"),
            Ok(Command::HeDid(Some(jmv(6, 6, 6, 5))))
        );
    }

    #[test]
    fn minus_one_is_a_pass() {
        assert_eq!(Command::<Position>::parse("HEDID -1 -1"), Ok(Command::HeDid(None)));
        assert_eq!(
            Command::<JungleMove>::parse("HEDID 1 1 -1 -1 -1 -1"),
            Ok(Command::HeDid(None))
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(Command::<Position>::parse("   "), Err(ProtocolError::EmptyLine));
        assert_eq!(
            Command::<Position>::parse("HELLO"),
            Err(ProtocolError::UnknownCommand("HELLO".to_string()))
        );
        assert_eq!(
            Command::<JungleMove>::parse("HEDID 1 2 3"),
            Err(ProtocolError::Arity {
                command: "HEDID",
                expected: 4,
                actual: 3
            })
        );
        assert!(matches!(
            Command::<Position>::parse("HEDID a 2"),
            Err(ProtocolError::BadNumber(_))
        ));
        assert_eq!(
            Command::<Position>::parse("HEDID 8 0"),
            Err(ProtocolError::OffBoard(vec![8, 0]))
        );
        assert_eq!(
            Command::<JungleMove>::parse("HEDID 0 0 -1 -1"),
            Err(ProtocolError::OffBoard(vec![0, 0, -1, -1]))
        );
    }

    #[test]
    fn formats_replies() {
        assert_eq!(Reply::<Position>::Ready.to_string(), "RDY");
        assert_eq!(Reply::IDo(Some(Position::new(4, 5))).to_string(), "IDO 4 5");
        assert_eq!(Reply::<Position>::IDo(None).to_string(), "IDO -1 -1");
        assert_eq!(Reply::IDo(Some(jmv(0, 6, 0, 5))).to_string(), "IDO 0 6 0 5");
        assert_eq!(Reply::<JungleMove>::IDo(None).to_string(), "IDO -1 -1 -1 -1");
    }
}
