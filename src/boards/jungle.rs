use crate::board::{Board, GameOutcome, Position, Side};
use crate::error::LayoutError;

pub const WIDTH: i32 = 7;
pub const HEIGHT: i32 = 9;

/// Number of consecutive capture-free moves after which the game is scored.
pub const MAXIMAL_PASSIVE: u32 = 30;

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (-1, 0), (0, -1)];

const TRAPS: [Position; 6] = [
    Position::new(2, 0),
    Position::new(4, 0),
    Position::new(3, 1),
    Position::new(2, 8),
    Position::new(4, 8),
    Position::new(3, 7),
];

const START_PIECES: [(Side, Species, Position); 16] = [
    (Side::Second, Species::Lion, Position::new(0, 0)),
    (Side::Second, Species::Tiger, Position::new(6, 0)),
    (Side::Second, Species::Dog, Position::new(1, 1)),
    (Side::Second, Species::Cat, Position::new(5, 1)),
    (Side::Second, Species::Rat, Position::new(0, 2)),
    (Side::Second, Species::Jaguar, Position::new(2, 2)),
    (Side::Second, Species::Wolf, Position::new(4, 2)),
    (Side::Second, Species::Elephant, Position::new(6, 2)),
    (Side::First, Species::Elephant, Position::new(0, 6)),
    (Side::First, Species::Wolf, Position::new(2, 6)),
    (Side::First, Species::Jaguar, Position::new(4, 6)),
    (Side::First, Species::Rat, Position::new(6, 6)),
    (Side::First, Species::Cat, Position::new(1, 7)),
    (Side::First, Species::Dog, Position::new(5, 7)),
    (Side::First, Species::Tiger, Position::new(0, 8)),
    (Side::First, Species::Lion, Position::new(6, 8)),
];

/// Jungle animals ordered by rank, from the rat (0) to the elephant (7).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub enum Species {
    Rat = 0,
    Cat = 1,
    Dog = 2,
    Wolf = 3,
    Jaguar = 4,
    Tiger = 5,
    Lion = 6,
    Elephant = 7,
}

impl Species {
    pub const ALL: [Species; 8] = [
        Species::Rat,
        Species::Cat,
        Species::Dog,
        Species::Wolf,
        Species::Jaguar,
        Species::Tiger,
        Species::Lion,
        Species::Elephant,
    ];

    /// Material value used by the evaluator. The rat is worth more than its
    /// rank because it is the only threat to the elephant.
    pub fn value(self) -> i32 {
        match self {
            Species::Rat => 4,
            Species::Cat => 1,
            Species::Dog => 2,
            Species::Wolf => 3,
            Species::Jaguar => 5,
            Species::Tiger => 7,
            Species::Lion => 8,
            Species::Elephant => 10,
        }
    }

    /// Lower case letter used in layouts.
    pub fn letter(self) -> char {
        match self {
            Species::Rat => 'r',
            Species::Cat => 'c',
            Species::Dog => 'd',
            Species::Wolf => 'w',
            Species::Jaguar => 'j',
            Species::Tiger => 't',
            Species::Lion => 'l',
            Species::Elephant => 'e',
        }
    }

    fn from_letter(letter: char) -> Option<Species> {
        Species::ALL
            .into_iter()
            .find(|species| species.letter() == letter)
    }

    fn can_leap(self) -> bool {
        matches!(self, Species::Tiger | Species::Lion)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Piece {
    pub side: Side,
    pub species: Species,
}

/// A piece moving from `from` to `to`. Leaps over the pond are a single move.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct JungleMove {
    pub from: Position,
    pub to: Position,
}

impl JungleMove {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

pub fn in_bounds(pos: Position) -> bool {
    (0..WIDTH).contains(&pos.x) && (0..HEIGHT).contains(&pos.y)
}

pub fn is_pond(pos: Position) -> bool {
    matches!(pos.x, 1 | 2 | 4 | 5) && (3..=5).contains(&pos.y)
}

pub fn is_trap(pos: Position) -> bool {
    TRAPS.contains(&pos)
}

/// The home cell of `side`. The opponent entering it wins the game.
pub fn den(side: Side) -> Position {
    match side {
        Side::First => Position::new(3, 8),
        Side::Second => Position::new(3, 0),
    }
}

/// Decides whether `attacker` standing on `attacker_pos` may capture `defender`
/// standing on `defender_pos`.
pub fn can_beat(
    attacker: Species,
    defender: Species,
    attacker_pos: Position,
    defender_pos: Position,
) -> bool {
    // only rats swim, so this is a rat fight in the water
    if is_pond(attacker_pos) && is_pond(defender_pos) {
        return true;
    }
    if is_pond(attacker_pos) {
        return false;
    }
    if attacker == Species::Rat && defender == Species::Elephant {
        return true;
    }
    if attacker == Species::Elephant && defender == Species::Rat {
        return false;
    }

    attacker >= defender || is_trap(defender_pos)
}

fn strictly_between(value: i32, a: i32, b: i32) -> bool {
    a.min(b) < value && value < a.max(b)
}

/// A Jungle position.
///
/// Cells and the per-player piece index are updated together on every move, so
/// `piece_at(position_of(side, species)) == Some(piece)` always holds. There is
/// no undo; searches explore copies.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct JungleBoard {
    cells: [[Option<Piece>; WIDTH as usize]; HEIGHT as usize],
    pieces: [[Option<Position>; 8]; 2],
    peace_counter: u32,
}

impl Default for JungleBoard {
    /// Creates the standard starting layout with the first player to move.
    fn default() -> Self {
        let mut board = Self::empty();
        for (side, species, pos) in START_PIECES {
            board.place(Piece { side, species }, pos);
        }
        board
    }
}

impl JungleBoard {
    fn empty() -> Self {
        Self {
            cells: [[None; WIDTH as usize]; HEIGHT as usize],
            pieces: [[None; 8]; 2],
            peace_counter: 0,
        }
    }

    /// Parses a layout of nine whitespace separated rows of seven cells, top row
    /// first. Upper case letters belong to the second player, lower case to the
    /// first, `.` is an empty cell.
    ///
    /// ```
    /// use duel_engines::boards::jungle::JungleBoard;
    ///
    /// let board = JungleBoard::from_layout(
    ///     "L.....T .D...C. R.J.W.E ....... ....... ....... e.w.j.r .c...d. t.....l",
    /// )
    /// .unwrap();
    /// assert_eq!(board, JungleBoard::default());
    /// ```
    pub fn from_layout(layout: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = layout.split_whitespace().collect();
        if rows.len() != HEIGHT as usize {
            return Err(LayoutError::RowCount {
                expected: HEIGHT as usize,
                actual: rows.len(),
            });
        }

        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != WIDTH as usize {
                return Err(LayoutError::RowWidth {
                    row: y,
                    expected: WIDTH as usize,
                    actual: width,
                });
            }

            for (x, symbol) in row.chars().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let species = Species::from_letter(symbol.to_ascii_lowercase())
                    .ok_or(LayoutError::UnknownSymbol { symbol, x, y })?;
                let side = if symbol.is_ascii_uppercase() {
                    Side::Second
                } else {
                    Side::First
                };
                if board.position_of(side, species).is_some() {
                    return Err(LayoutError::DuplicatePiece { symbol });
                }
                board.place(Piece { side, species }, Position::new(x as i32, y as i32));
            }
        }

        Ok(board)
    }

    fn place(&mut self, piece: Piece, pos: Position) {
        self.cells[pos.y as usize][pos.x as usize] = Some(piece);
        self.pieces[piece.side.index()][piece.species as usize] = Some(pos);
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        if !in_bounds(pos) {
            return None;
        }
        self.cells[pos.y as usize][pos.x as usize]
    }

    pub fn position_of(&self, side: Side, species: Species) -> Option<Position> {
        self.pieces[side.index()][species as usize]
    }

    /// Iterates the remaining pieces of `side` in rank order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Species, Position)> + '_ {
        Species::ALL
            .into_iter()
            .filter_map(move |species| self.position_of(side, species).map(|pos| (species, pos)))
    }

    /// Moves played since the last capture.
    pub fn peace_counter(&self) -> u32 {
        self.peace_counter
    }

    /// Returns the winner once the game is decided.
    pub fn winner(&self) -> Option<Side> {
        if let Some(side) = Side::BOTH.into_iter().find(|side| self.broke_through(*side)) {
            return Some(side);
        }

        (self.peace_counter >= MAXIMAL_PASSIVE).then(|| self.peace_verdict())
    }

    fn broke_through(&self, side: Side) -> bool {
        let opponent = side.opponent();
        self.pieces(opponent).next().is_none() || self.piece_at(den(opponent)).is_some()
    }

    /// Scores a drawn-out game: going down from the elephant, the first species
    /// only one side still holds decides. Full equality goes to the second player.
    fn peace_verdict(&self) -> Side {
        for species in Species::ALL.into_iter().rev() {
            let first = self.position_of(Side::First, species).is_some();
            let second = self.position_of(Side::Second, species).is_some();
            match (first, second) {
                (true, false) => return Side::First,
                (false, true) => return Side::Second,
                _ => {}
            }
        }
        Side::Second
    }

    /// Whether an opposing rat swimming between `from` and `to` stops a leap.
    fn rat_blocks_leap(&self, mover: Side, from: Position, to: Position) -> bool {
        let Some(rat) = self.position_of(mover.opponent(), Species::Rat) else {
            return false;
        };
        if !is_pond(rat) {
            return false;
        }

        if from.x == to.x {
            rat.x == from.x && strictly_between(rat.y, from.y, to.y)
        } else {
            rat.y == from.y && strictly_between(rat.x, from.x, to.x)
        }
    }

    fn destination(
        &self,
        player: Side,
        species: Species,
        from: Position,
        dx: i32,
        dy: i32,
    ) -> Option<Position> {
        let step = from.offset(dx, dy);
        if !in_bounds(step) || step == den(player) {
            return None;
        }
        if !is_pond(step) || species == Species::Rat {
            return Some(step);
        }
        if !species.can_leap() {
            return None;
        }

        // ponds are two cells wide and three cells tall
        let landing = from.offset(dx * 3, dy * 4);
        if !in_bounds(landing) || self.rat_blocks_leap(player, from, landing) {
            return None;
        }
        Some(landing)
    }
}

impl Board for JungleBoard {
    type Move = JungleMove;

    fn legal_moves(&self, player: Side) -> Vec<Self::Move> {
        let mut moves = Vec::new();

        for (species, from) in self.pieces(player) {
            for (dx, dy) in DIRECTIONS {
                let Some(to) = self.destination(player, species, from, dx, dy) else {
                    continue;
                };
                if let Some(target) = self.piece_at(to) {
                    if target.side == player || !can_beat(species, target.species, from, to) {
                        continue;
                    }
                }
                moves.push(JungleMove::new(from, to));
            }
        }

        moves
    }

    fn perform_move(&mut self, b_move: Option<Self::Move>, player: Side) {
        let Some(JungleMove { from, to }) = b_move else {
            return;
        };
        let Some(piece) = self.piece_at(from) else {
            return;
        };

        if let Some(captured) = self.piece_at(to) {
            self.pieces[captured.side.index()][captured.species as usize] = None;
            self.peace_counter = 0;
        } else {
            self.peace_counter += 1;
        }

        self.cells[from.y as usize][from.x as usize] = None;
        self.place(piece, to);
    }

    fn get_outcome(&self) -> GameOutcome {
        match self.winner() {
            Some(side) => GameOutcome::Winner(side),
            None => GameOutcome::InProgress,
        }
    }
}
