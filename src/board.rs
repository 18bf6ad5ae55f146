use std::fmt::Debug;
use std::hash::Hash;

/// The central trait of the library, defining the interface for a game state.
///
/// Both search engines are generic over it: alpha-beta walks the tree through
/// [`Board::explore`], MCTS clones states into its node arena.
/// `Default` must produce the game's starting layout.
pub trait Board: Default + Clone {
    /// The type representing a real move. A pass is expressed as `None` wherever
    /// an `Option<Self::Move>` is accepted.
    type Move: Copy + Eq + Hash + Debug;

    /// Returns every legal move for `player` in the current state.
    ///
    /// An empty list on a non-terminal state means `player` has to pass.
    fn legal_moves(&self, player: Side) -> Vec<Self::Move>;

    /// Applies a move (or a pass, when `b_move` is `None`) made by `player`.
    ///
    /// The move is not validated; callers only feed moves taken from
    /// [`Board::legal_moves`].
    fn perform_move(&mut self, b_move: Option<Self::Move>, player: Side);

    /// Returns the current outcome of the game.
    fn get_outcome(&self) -> GameOutcome;

    /// Returns `true` once the game is decided.
    fn is_terminal(&self) -> bool {
        self.get_outcome() != GameOutcome::InProgress
    }

    /// Runs `f` on the state reached by playing `b_move` for `player`, leaving
    /// `self` as it was once `f` returns.
    ///
    /// The default works on a private copy. Boards with an undo stack override it
    /// to apply and revert in place.
    fn explore<R>(
        &mut self,
        b_move: Option<Self::Move>,
        player: Side,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let mut next = self.clone();
        next.perform_move(b_move, player);
        f(&mut next)
    }
}

/// Represents the possible outcomes of a game.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    /// The game is still ongoing.
    InProgress,
    /// The game is over and the given side has won.
    Winner(Side),
    /// The game is over without a winner.
    Draw,
}

impl GameOutcome {
    /// Returns the winning side, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            GameOutcome::Winner(side) => Some(side),
            _ => None,
        }
    }
}

/// One of the two players. `First` is player 0 and moves first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub enum Side {
    First = 0,
    Second = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    /// Returns the other player.
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Returns `0` for the first player and `1` for the second.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A cell coordinate. `x` is the column and `y` the row, both counted from zero.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by `(dx, dy)`. No bounds checking.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}
