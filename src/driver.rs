//! The session loop between the protocol and an [`Agent`].
//!
//! It knows nothing about where lines come from, so it runs the same over a
//! channel fed by stdin and over a plain vector in tests.

use std::io::{self, Write};

use tracing::{info, trace};

use crate::agent::{Agent, Strategy};
use crate::board::{Board, Side};
use crate::error::DriverError;
use crate::protocol::{Command, Reply, WireMove};

/// Counters reported when a session ends.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct SessionSummary {
    /// Games started, the initial one included.
    pub games: u32,
    /// `IDO` lines sent, passes included.
    pub replies: u32,
}

/// Drives `agent` with the inbound `lines` and writes replies to `out`.
///
/// The agent starts as the second player and announces itself with `RDY`.
/// `UGO` switches it to the first player, `HEDID` registers the opponent's move;
/// both are answered with `IDO`. `ONEMORE` resets and answers `RDY` again.
/// The session ends on `BYE` or when `lines` runs out. Every reply is flushed
/// immediately.
///
/// Malformed lines, unknown commands and moves the agent refuses end the
/// session with an error.
pub fn run_session<B, S, I, W>(
    agent: &mut Agent<B, S>,
    lines: I,
    out: &mut W,
) -> Result<SessionSummary, DriverError>
where
    B: Board,
    B::Move: WireMove,
    S: Strategy<B>,
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    info!("session started");
    let mut summary = SessionSummary {
        games: 1,
        replies: 0,
    };

    agent.reset(Side::Second);
    send(out, &Reply::<B::Move>::Ready)?;

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            trace!("skipping blank line");
            continue;
        }

        match Command::<B::Move>::parse(&line)? {
            Command::Ugo => {
                agent.set_side(Side::First);
                respond(agent, out)?;
                summary.replies += 1;
            }
            Command::HeDid(b_move) => {
                agent.register(b_move)?;
                respond(agent, out)?;
                summary.replies += 1;
            }
            Command::OneMore => {
                agent.reset(Side::Second);
                send(out, &Reply::<B::Move>::Ready)?;
                summary.games += 1;
            }
            Command::Bye => {
                info!(
                    games = summary.games,
                    replies = summary.replies,
                    "session closed by opponent"
                );
                return Ok(summary);
            }
        }
    }

    info!(games = summary.games, replies = summary.replies, "input exhausted");
    Ok(summary)
}

fn respond<B, S, W>(agent: &mut Agent<B, S>, out: &mut W) -> Result<(), DriverError>
where
    B: Board,
    B::Move: WireMove,
    S: Strategy<B>,
    W: Write,
{
    let played = agent.play();
    send(out, &Reply::IDo(played.action))?;
    if played.finished {
        info!(outcome = ?agent.board().get_outcome(), "game finished");
    }
    Ok(())
}

fn send<M: WireMove, W: Write>(out: &mut W, reply: &Reply<M>) -> io::Result<()> {
    writeln!(out, "{reply}")?;
    out.flush()
}
