//! duel - protocol front end for the Jungle and Reversi engines
//!
//! Reads opponent commands from stdin, answers on stdout, logs to stderr.
//! Stdin is read on its own thread and handed over through a bounded channel,
//! so the session loop never touches the terminal directly.

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing::level_filters::LevelFilter;

use duel_engines::agent::{Agent, MctsStrategy, RandomStrategy, Strategy};
use duel_engines::alpha_beta::AlphaBeta;
use duel_engines::board::Board;
use duel_engines::boards::jungle::JungleBoard;
use duel_engines::boards::reversi::ReversiBoard;
use duel_engines::config::{AlphaBetaConfig, MctsConfig, Reward};
use duel_engines::driver::run_session;
use duel_engines::evaluator::{JungleEvaluator, ReversiEvaluator};
use duel_engines::protocol::WireMove;
use duel_engines::random::StandardRandomGenerator;

const INBOX_CAPACITY: usize = 16;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Game {
    Jungle,
    Reversi,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum StrategyKind {
    AlphaBeta,
    Mcts,
    Random,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum RewardArg {
    Mover,
    Root,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "duel")]
#[command(about = "Jungle and Reversi engines speaking the UGO/HEDID line protocol")]
struct Cli {
    /// Game to play
    #[arg(long, value_enum, default_value_t = Game::Reversi)]
    game: Game,

    /// Move selection strategy
    #[arg(long, value_enum, default_value_t = StrategyKind::AlphaBeta)]
    strategy: StrategyKind,

    /// Plies searched below each root move (alpha-beta)
    #[arg(long, default_value_t = AlphaBetaConfig::default().depth)]
    depth: u32,

    /// Search plain minimax instead of pruning (alpha-beta)
    #[arg(long)]
    no_pruning: bool,

    /// Rollouts per move (mcts)
    #[arg(long, default_value_t = MctsConfig::default().rollouts)]
    rollouts: u32,

    /// UCT exploration constant (mcts)
    #[arg(long, default_value_t = MctsConfig::default().exploration)]
    exploration: f64,

    /// Whose wins are counted during backpropagation (mcts)
    #[arg(long, value_enum, default_value_t = RewardArg::Mover)]
    reward: RewardArg,

    /// Seed for mcts and random play; taken from the OS when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Consider every Reversi move even when a corner is available (alpha-beta)
    #[arg(long)]
    no_corner_preference: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn validate(&self) -> Result<()> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!("exploration must be a non-negative number"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    fn alpha_beta_config(&self) -> AlphaBetaConfig {
        AlphaBetaConfig::default()
            .with_depth(self.depth)
            .with_pruning(!self.no_pruning)
    }

    fn mcts_config(&self) -> MctsConfig {
        let reward = match self.reward {
            RewardArg::Mover => Reward::Mover,
            RewardArg::Root => Reward::Root,
        };
        MctsConfig::default()
            .with_rollouts(self.rollouts)
            .with_exploration(self.exploration)
            .with_reward(reward)
    }

    fn random(&self) -> StandardRandomGenerator {
        self.seed
            .map_or_else(StandardRandomGenerator::default, StandardRandomGenerator::seeded)
    }
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout belongs to the protocol
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init()?;

    Ok(())
}

/// Forwards stdin lines into a bounded channel until EOF or until the session
/// stops listening.
fn spawn_reader() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::sync_channel(INBOX_CAPACITY);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

fn serve<B, S>(strategy: S, inbox: mpsc::Receiver<io::Result<String>>) -> Result<()>
where
    B: Board,
    B::Move: WireMove,
    S: Strategy<B>,
{
    let mut agent: Agent<B, S> = Agent::new(strategy);
    let mut out = io::stdout().lock();
    let summary = run_session(&mut agent, inbox, &mut out)?;
    info!(games = summary.games, replies = summary.replies, "session finished");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;
    init_tracing(&cli.log_level)?;
    info!(game = ?cli.game, strategy = ?cli.strategy, "duel starting");

    let inbox = spawn_reader();
    match (cli.game, cli.strategy) {
        (Game::Jungle, StrategyKind::AlphaBeta) => serve::<JungleBoard, _>(
            AlphaBeta::new(JungleEvaluator, cli.alpha_beta_config()),
            inbox,
        ),
        (Game::Reversi, StrategyKind::AlphaBeta) => serve::<ReversiBoard, _>(
            AlphaBeta::new(
                ReversiEvaluator::new(!cli.no_corner_preference),
                cli.alpha_beta_config(),
            ),
            inbox,
        ),
        (Game::Jungle, StrategyKind::Mcts) => serve::<JungleBoard, _>(
            MctsStrategy::new(cli.mcts_config(), cli.random()),
            inbox,
        ),
        (Game::Reversi, StrategyKind::Mcts) => serve::<ReversiBoard, _>(
            MctsStrategy::new(cli.mcts_config(), cli.random()),
            inbox,
        ),
        (Game::Jungle, StrategyKind::Random) => {
            serve::<JungleBoard, _>(RandomStrategy::new(cli.random()), inbox)
        }
        (Game::Reversi, StrategyKind::Random) => {
            serve::<ReversiBoard, _>(RandomStrategy::new(cli.random()), inbox)
        }
    }
}
